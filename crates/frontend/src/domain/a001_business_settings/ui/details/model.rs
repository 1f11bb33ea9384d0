use contracts::domain::a001_business_settings::aggregate::{
    BusinessSettings, BusinessSettingsDto, OtpRequest,
};
use contracts::shared::api::{self, RemoteEnvelope};

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_by_id(id: &str) -> Result<BusinessSettings, String> {
    get_json(&api::business_settings_path(id)).await
}

/// Returns the id of the saved record
pub async fn save_form(dto: &BusinessSettingsDto) -> Result<String, String> {
    let result: serde_json::Value = post_json(api::BUSINESS_SETTINGS, dto).await?;
    result["id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "Server did not return an id".to_string())
}

pub async fn onboard(id: &str, otp: String) -> Result<RemoteEnvelope, String> {
    post_json(&api::onboard_path(id), &OtpRequest { otp }).await
}

pub async fn production_csid(id: &str, otp: String) -> Result<RemoteEnvelope, String> {
    post_json(&api::production_csid_path(id), &OtpRequest { otp }).await
}
