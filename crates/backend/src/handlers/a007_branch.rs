use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a007_branch::aggregate::{Branch, BranchDto};
use serde_json::json;

use super::failure;
use crate::domain::a007_branch;

/// GET /api/branch
pub async fn list_all() -> Result<Json<Vec<Branch>>, StatusCode> {
    match a007_branch::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list branches: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/branch/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Branch>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a007_branch::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load branch {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/branch
pub async fn upsert(
    Json(dto): Json<BranchDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let result = if dto.id.is_some() {
        let id = dto.id.clone().unwrap_or_default();
        a007_branch::service::update(dto)
            .await
            .map(|_| id)
    } else {
        a007_branch::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err(failure("Failed to save branch", e)),
    }
}
