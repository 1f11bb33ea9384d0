use contracts::domain::a002_phase1_business_settings::aggregate::{
    Phase1BusinessSettings, Phase1BusinessSettingsDto,
};
use contracts::shared::api;

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_by_id(id: &str) -> Result<Phase1BusinessSettings, String> {
    get_json(&format!("{}/{}", api::PHASE1_BUSINESS_SETTINGS, id)).await
}

/// Returns the id of the saved record
pub async fn save_form(dto: &Phase1BusinessSettingsDto) -> Result<String, String> {
    let result: serde_json::Value = post_json(api::PHASE1_BUSINESS_SETTINGS, dto).await?;
    result["id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "Server did not return an id".to_string())
}
