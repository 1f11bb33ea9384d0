use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a006_customer::aggregate::{Customer, CustomerDto};
use serde_json::json;

use super::failure;
use crate::domain::a006_customer;

/// GET /api/customer
pub async fn list_all() -> Result<Json<Vec<Customer>>, StatusCode> {
    match a006_customer::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list customers: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/customer/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Customer>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a006_customer::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load customer {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/customer
pub async fn upsert(
    Json(dto): Json<CustomerDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let result = if dto.id.is_some() {
        let id = dto.id.clone().unwrap_or_default();
        a006_customer::service::update(dto)
            .await
            .map(|_| id)
    } else {
        a006_customer::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({ "id": id }))),
        Err(e) => Err(failure("Failed to save customer", e)),
    }
}
