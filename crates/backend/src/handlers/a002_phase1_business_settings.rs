use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_phase1_business_settings::aggregate::{
    Phase1BusinessSettings, Phase1BusinessSettingsDto,
};
use serde_json::json;

use super::failure;
use crate::domain::a002_phase1_business_settings;

/// GET /api/phase1_business_settings
pub async fn list_all() -> Result<Json<Vec<Phase1BusinessSettings>>, StatusCode> {
    match a002_phase1_business_settings::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list phase 1 settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/phase1_business_settings/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Phase1BusinessSettings>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a002_phase1_business_settings::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load phase 1 settings {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/phase1_business_settings
pub async fn upsert(
    Json(dto): Json<Phase1BusinessSettingsDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let result = if dto.id.is_some() {
        let id = dto.id.clone().unwrap_or_default();
        a002_phase1_business_settings::service::update(dto)
            .await
            .map(|_| id)
    } else {
        a002_phase1_business_settings::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err(failure("Failed to save phase 1 settings", e)),
    }
}
