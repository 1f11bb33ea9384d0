use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_business_settings::aggregate::{
    BusinessSettings, BusinessSettingsDto, OtpRequest,
};
use contracts::shared::api::RemoteEnvelope;
use serde_json::json;

use super::failure;
use crate::domain::a001_business_settings;

fn parse_id(id: &str) -> Result<uuid::Uuid, (StatusCode, String)> {
    uuid::Uuid::parse_str(id).map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid ID {}", id)))
}

/// GET /api/business_settings
pub async fn list_all() -> Result<Json<Vec<BusinessSettings>>, StatusCode> {
    match a001_business_settings::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list business settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/business_settings/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<BusinessSettings>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a001_business_settings::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load business settings {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/business_settings
pub async fn upsert(
    Json(dto): Json<BusinessSettingsDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let result = if dto.id.is_some() {
        let id = dto.id.clone().unwrap_or_default();
        a001_business_settings::service::update(dto).await.map(|_| id)
    } else {
        a001_business_settings::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err(failure("Failed to save business settings", e)),
    }
}

/// DELETE /api/business_settings/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a001_business_settings::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete business settings {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/business_settings/:id/onboard
pub async fn onboard(
    Path(id): Path<String>,
    Json(request): Json<OtpRequest>,
) -> Result<Json<RemoteEnvelope>, (StatusCode, String)> {
    let uuid = parse_id(&id)?;
    a001_business_settings::service::onboard(uuid, request)
        .await
        .map(Json)
        .map_err(|e| failure("Onboarding failed", e))
}

/// POST /api/business_settings/:id/production_csid
pub async fn production_csid(
    Path(id): Path<String>,
    Json(request): Json<OtpRequest>,
) -> Result<Json<RemoteEnvelope>, (StatusCode, String)> {
    let uuid = parse_id(&id)?;
    a001_business_settings::service::get_production_csid(uuid, request)
        .await
        .map(Json)
        .map_err(|e| failure("Production CSID failed", e))
}
