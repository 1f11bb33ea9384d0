use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Tables created on start when missing
const SCHEMA: &[(&str, &str)] = &[
    (
        "company",
        r#"
        CREATE TABLE IF NOT EXISTS company (
            name TEXT PRIMARY KEY NOT NULL,
            vat_registration_number TEXT NOT NULL DEFAULT ''
        );
        "#,
    ),
    (
        "company_address",
        r#"
        CREATE TABLE IF NOT EXISTS company_address (
            id TEXT PRIMARY KEY NOT NULL,
            company TEXT NOT NULL,
            address_line TEXT NOT NULL DEFAULT '',
            is_primary INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "file",
        r#"
        CREATE TABLE IF NOT EXISTS file (
            id TEXT PRIMARY KEY NOT NULL,
            file_name TEXT NOT NULL,
            file_url TEXT NOT NULL UNIQUE,
            stored_path TEXT NOT NULL,
            file_size INTEGER NOT NULL,
            content_type TEXT,
            created_at TEXT
        );
        "#,
    ),
    (
        "a001_business_settings",
        r#"
        CREATE TABLE IF NOT EXISTS a001_business_settings (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            company TEXT NOT NULL,
            company_address TEXT NOT NULL DEFAULT '',
            seller_name TEXT NOT NULL DEFAULT '',
            vat_registration_number TEXT NOT NULL DEFAULT '',
            fatoora_server_url TEXT NOT NULL DEFAULT '',
            enable_zatca_integration INTEGER NOT NULL DEFAULT 0,
            enable_branch_configuration INTEGER NOT NULL DEFAULT 0,
            sync_with_zatca TEXT NOT NULL DEFAULT 'Live',
            compliance_request_id TEXT,
            production_request_id TEXT,
            other_ids_json TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_phase1_business_settings",
        r#"
        CREATE TABLE IF NOT EXISTS a002_phase1_business_settings (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            company TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'Active',
            type_of_transaction TEXT NOT NULL DEFAULT 'Both',
            vat_registration_number TEXT NOT NULL DEFAULT '',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a006_customer",
        r#"
        CREATE TABLE IF NOT EXISTS a006_customer (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            customer_name TEXT NOT NULL,
            vat_registration_number TEXT NOT NULL DEFAULT '',
            additional_ids_json TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a007_branch",
        r#"
        CREATE TABLE IF NOT EXISTS a007_branch (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            branch_name TEXT NOT NULL,
            company TEXT NOT NULL,
            company_address TEXT NOT NULL DEFAULT '',
            branch_ids_json TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a004_invoice_additional_fields",
        r#"
        CREATE TABLE IF NOT EXISTS a004_invoice_additional_fields (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL,
            sales_invoice TEXT NOT NULL,
            invoice_doctype TEXT NOT NULL,
            integration_status TEXT NOT NULL,
            is_latest INTEGER NOT NULL DEFAULT 1,
            total_tax_amount TEXT NOT NULL DEFAULT '0',
            total_amount_without_taxes_and_discount TEXT NOT NULL DEFAULT '0',
            total_amount_without_taxes TEXT NOT NULL DEFAULT '0',
            total_amount_with_taxes_and_discount TEXT NOT NULL DEFAULT '0',
            total_discount_amount TEXT NOT NULL DEFAULT '0',
            items_json TEXT NOT NULL DEFAULT '[]',
            created_at TEXT
        );
        "#,
    ),
    (
        "a005_invoice_fix_rejection",
        r#"
        CREATE TABLE IF NOT EXISTS a005_invoice_fix_rejection (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            invoice_type TEXT NOT NULL,
            invoice TEXT,
            fix_reason TEXT NOT NULL DEFAULT '',
            draft_json TEXT NOT NULL,
            successor_id TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_a004_invoice ON a004_invoice_additional_fields (sales_invoice, invoice_doctype);",
    "CREATE INDEX IF NOT EXISTS idx_a004_status ON a004_invoice_additional_fields (integration_status, is_latest);",
    "CREATE INDEX IF NOT EXISTS idx_company_address_company ON company_address (company);",
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Connecting to database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Creates missing tables and indexes
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, sql) in SCHEMA {
        tracing::debug!("Ensuring table {}", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    for sql in INDEXES {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    tracing::info!("Database schema ready ({} tables)", SCHEMA.len());
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_tables_are_unique() {
        let mut names: Vec<_> = SCHEMA.iter().map(|(name, _)| *name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SCHEMA.len());
        for (name, sql) in SCHEMA {
            assert!(sql.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", name)));
        }
    }
}
