use contracts::domain::a006_customer::aggregate::{Customer, CustomerDto};
use contracts::shared::api;

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_by_id(id: &str) -> Result<Customer, String> {
    get_json(&api::customer_path(id)).await
}

pub async fn save_form(dto: &CustomerDto) -> Result<String, String> {
    let result: serde_json::Value = post_json(api::CUSTOMERS, dto).await?;
    result["id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "Server did not return an id".to_string())
}
