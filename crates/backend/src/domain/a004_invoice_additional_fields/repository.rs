use std::str::FromStr;

use chrono::Utc;
use contracts::domain::a004_invoice_additional_fields::InvoiceAdditionalFields;
use contracts::domain::a005_invoice_fix_rejection::{InvoiceLineAmounts, InvoiceTotals};
use contracts::enums::{IntegrationStatus, InvoiceType};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_invoice_additional_fields")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub sales_invoice: String,
    pub invoice_doctype: String,
    pub integration_status: String,
    pub is_latest: bool,
    pub total_tax_amount: String,
    pub total_amount_without_taxes_and_discount: String,
    pub total_amount_without_taxes: String,
    pub total_amount_with_taxes_and_discount: String,
    pub total_discount_amount: String,
    pub items_json: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_amount(id: &str, column: &str, value: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| {
        anyhow::anyhow!("Broken {} '{}' in additional fields {}: {}", column, value, id, e)
    })
}

impl TryFrom<Model> for InvoiceAdditionalFields {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let invoice_doctype = InvoiceType::from_label(&m.invoice_doctype)
            .ok_or_else(|| anyhow::anyhow!("Unknown invoice doctype '{}'", m.invoice_doctype))?;
        let integration_status = IntegrationStatus::parse(&m.integration_status).ok_or_else(
            || anyhow::anyhow!("Unknown integration status '{}'", m.integration_status),
        )?;
        let items: Vec<InvoiceLineAmounts> = serde_json::from_str(&m.items_json)?;

        let totals = InvoiceTotals {
            tax_amount: parse_amount(&m.id, "total_tax_amount", &m.total_tax_amount)?,
            amount_without_taxes_and_discount: parse_amount(
                &m.id,
                "total_amount_without_taxes_and_discount",
                &m.total_amount_without_taxes_and_discount,
            )?,
            amount_without_taxes: parse_amount(
                &m.id,
                "total_amount_without_taxes",
                &m.total_amount_without_taxes,
            )?,
            amount_with_taxes_and_discount: parse_amount(
                &m.id,
                "total_amount_with_taxes_and_discount",
                &m.total_amount_with_taxes_and_discount,
            )?,
            discount_amount: parse_amount(&m.id, "total_discount_amount", &m.total_discount_amount)?,
        };

        Ok(InvoiceAdditionalFields {
            totals,
            id: m.id,
            code: m.code,
            sales_invoice: m.sales_invoice,
            invoice_doctype,
            integration_status,
            is_latest: m.is_latest,
            items,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(record: &InvoiceAdditionalFields) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(record.id.clone()),
        code: Set(record.code.clone()),
        sales_invoice: Set(record.sales_invoice.clone()),
        invoice_doctype: Set(record.invoice_doctype.label().to_string()),
        integration_status: Set(record.integration_status.as_str().to_string()),
        is_latest: Set(record.is_latest),
        total_tax_amount: Set(record.totals.tax_amount.to_string()),
        total_amount_without_taxes_and_discount: Set(record
            .totals
            .amount_without_taxes_and_discount
            .to_string()),
        total_amount_without_taxes: Set(record.totals.amount_without_taxes.to_string()),
        total_amount_with_taxes_and_discount: Set(record
            .totals
            .amount_with_taxes_and_discount
            .to_string()),
        total_discount_amount: Set(record.totals.discount_amount.to_string()),
        items_json: Set(serde_json::to_string(&record.items)?),
        created_at: Set(Some(Utc::now())),
    })
}

fn collect(models: Vec<Model>) -> anyhow::Result<Vec<InvoiceAdditionalFields>> {
    models.into_iter().map(TryInto::try_into).collect()
}

/// Latest records of one doctype in the given status, by invoice name
pub async fn list_latest_by_status(
    invoice_type: InvoiceType,
    status: IntegrationStatus,
) -> anyhow::Result<Vec<InvoiceAdditionalFields>> {
    let models = Entity::find()
        .filter(Column::InvoiceDoctype.eq(invoice_type.label()))
        .filter(Column::IntegrationStatus.eq(status.as_str()))
        .filter(Column::IsLatest.eq(true))
        .order_by_asc(Column::SalesInvoice)
        .all(conn())
        .await?;
    collect(models)
}

pub async fn get_latest(
    invoice_type: InvoiceType,
    invoice: &str,
) -> anyhow::Result<Option<InvoiceAdditionalFields>> {
    let result = Entity::find()
        .filter(Column::InvoiceDoctype.eq(invoice_type.label()))
        .filter(Column::SalesInvoice.eq(invoice))
        .filter(Column::IsLatest.eq(true))
        .one(conn())
        .await?;
    result.map(TryInto::try_into).transpose()
}

/// Latest record of an invoice regardless of doctype
pub async fn get_latest_for_invoice(
    invoice: &str,
) -> anyhow::Result<Option<InvoiceAdditionalFields>> {
    let result = Entity::find()
        .filter(Column::SalesInvoice.eq(invoice))
        .filter(Column::IsLatest.eq(true))
        .one(conn())
        .await?;
    result.map(TryInto::try_into).transpose()
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    record: &InvoiceAdditionalFields,
) -> anyhow::Result<()> {
    to_active(record)?.insert(db).await?;
    Ok(())
}

/// Drops the latest flag from every record of an invoice
pub async fn clear_latest<C: ConnectionTrait>(
    db: &C,
    invoice_type: InvoiceType,
    invoice: &str,
) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsLatest, Expr::value(false))
        .filter(Column::InvoiceDoctype.eq(invoice_type.label()))
        .filter(Column::SalesInvoice.eq(invoice))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model {
            id: "f1".into(),
            code: "SIAF-0001".into(),
            sales_invoice: "INV-0007".into(),
            invoice_doctype: "Sales Invoice".into(),
            integration_status: "Rejected".into(),
            is_latest: true,
            total_tax_amount: "15.00".into(),
            total_amount_without_taxes_and_discount: "100".into(),
            total_amount_without_taxes: "100".into(),
            total_amount_with_taxes_and_discount: "115".into(),
            total_discount_amount: "0".into(),
            items_json: r#"[{"item_code":"Widget","qty":1,"amount_without_taxes":100,"tax_amount":15,"discount_amount":0}]"#.into(),
            created_at: None,
        }
    }

    #[test]
    fn test_model_conversion() {
        let record: InvoiceAdditionalFields = model().try_into().unwrap();
        assert_eq!(record.invoice_doctype, InvoiceType::SalesInvoice);
        assert_eq!(record.integration_status, IntegrationStatus::Rejected);
        assert_eq!(record.totals.tax_amount, Decimal::from(15));
        assert_eq!(record.totals.discount_amount, Decimal::ZERO);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].item_code, "Widget");
    }

    #[test]
    fn test_broken_amount_is_an_error() {
        let mut m = model();
        m.total_discount_amount = "oops".into();
        let converted: anyhow::Result<InvoiceAdditionalFields> = m.try_into();
        let err = converted.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Broken total_discount_amount 'oops' in additional fields f1"));
    }

    #[test]
    fn test_unknown_doctype_is_an_error() {
        let mut m = model();
        m.invoice_doctype = "Purchase Invoice".into();
        let converted: anyhow::Result<InvoiceAdditionalFields> = m.try_into();
        assert!(converted.is_err());
    }
}
