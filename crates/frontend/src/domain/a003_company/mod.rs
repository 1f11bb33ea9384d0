//! Company lookups shared by the settings forms

use contracts::domain::a003_company::{Company, CompanyAddress};
use contracts::shared::api;

use crate::shared::api_utils::get_json;

pub async fn fetch_companies() -> Result<Vec<Company>, String> {
    get_json(api::COMPANIES).await
}

/// Company preselected when an action has none, if any company exists
pub async fn fetch_default_company() -> Result<Option<String>, String> {
    get_json(api::COMPANY_DEFAULT).await
}

/// Ids of the addresses linked to a company
pub async fn fetch_company_addresses(company_name: &str) -> Result<Vec<String>, String> {
    get_json(&format!(
        "{}?company_name={}",
        api::COMPANY_ADDRESSES,
        urlencoding::encode(company_name)
    ))
    .await
}

/// Primary addresses of a company, possibly none
pub async fn fetch_primary_address(company: &str) -> Result<Vec<CompanyAddress>, String> {
    get_json(&format!(
        "{}?company={}",
        api::COMPANY_PRIMARY_ADDRESS,
        urlencoding::encode(company)
    ))
    .await
}
