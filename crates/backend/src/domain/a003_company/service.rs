use super::{address_repository, repository};
use contracts::domain::a003_company::{default_company, Company, CompanyAddress};

use crate::shared::config::get_config;

pub async fn list_all() -> anyhow::Result<Vec<Company>> {
    repository::list_all().await
}

/// Company preselected by actions started without one
pub async fn get_default_company() -> anyhow::Result<Option<String>> {
    let configured = get_config()?.company.default.clone();
    let companies = repository::list_all().await?;
    Ok(default_company(configured.as_deref(), &companies))
}

/// Ids of the addresses linked to a company (options of the address field)
pub async fn fetch_company_addresses(company_name: &str) -> anyhow::Result<Vec<String>> {
    Ok(address_repository::list_by_company(company_name)
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect())
}

/// Primary addresses of a company; the client takes the first one
pub async fn get_company_primary_address(company: &str) -> anyhow::Result<Vec<CompanyAddress>> {
    address_repository::list_primary(company).await
}

/// Inserts sample companies and addresses when the table is empty
pub async fn insert_test_data() -> anyhow::Result<()> {
    if !repository::list_all().await?.is_empty() {
        tracing::info!("Companies already present, skipping test data");
        return Ok(());
    }

    let companies = [
        ("ACME KSA", "300000000000003"),
        ("Desert Trading", "310000000000003"),
    ];
    for (name, vat) in companies {
        repository::insert(&Company {
            name: name.into(),
            vat_registration_number: vat.into(),
        })
        .await?;
    }

    let addresses = [
        ("ACME KSA-Billing", "ACME KSA", "King Fahd Rd 1200, Riyadh", true),
        ("ACME KSA-Warehouse", "ACME KSA", "Industrial City 2, Dammam", false),
        ("Desert Trading-Office", "Desert Trading", "Tahlia St 45, Jeddah", false),
    ];
    for (id, company, line, is_primary) in addresses {
        address_repository::insert(&CompanyAddress {
            id: id.into(),
            company: company.into(),
            address_line: line.into(),
            is_primary,
        })
        .await?;
    }
    Ok(())
}
