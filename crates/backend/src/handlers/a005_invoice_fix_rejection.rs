use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a005_invoice_fix_rejection::{
    FixRejectionRequest, FixRejectionResponse, IntegrationStatusResponse, InvoiceAmountsDetails,
    InvoiceAmountsRequest, InvoiceFixRejection, RejectedInvoiceQuery, RejectionFixDraft,
    SavedFixRejection,
};
use contracts::enums::InvoiceType;
use serde::Deserialize;

use super::failure;
use crate::domain::{a004_invoice_additional_fields, a005_invoice_fix_rejection};

#[derive(Debug, Deserialize)]
pub struct IntegrationStatusQuery {
    pub invoice: String,
    pub doctype: Option<InvoiceType>,
}

/// GET /api/method/fix_rejection/rejected?invoice_type=...
pub async fn list_rejected(
    Query(query): Query<RejectedInvoiceQuery>,
) -> Result<Json<Vec<String>>, StatusCode> {
    match a004_invoice_additional_fields::service::list_rejected(query).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list rejected invoices: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/method/fix_rejection/amounts
pub async fn fetch_amounts(
    Json(request): Json<InvoiceAmountsRequest>,
) -> Result<Json<InvoiceAmountsDetails>, (StatusCode, String)> {
    match a004_invoice_additional_fields::service::fetch_invoice_amounts_details(&request).await {
        Ok(details) => Ok(Json(details)),
        Err(e) => {
            tracing::warn!("No amounts for {}: {}", request.invoice, e);
            Err((StatusCode::NOT_FOUND, e.to_string()))
        }
    }
}

/// GET /api/method/integration_status?invoice=...&doctype=...
pub async fn integration_status(
    Query(query): Query<IntegrationStatusQuery>,
) -> Result<Json<IntegrationStatusResponse>, StatusCode> {
    match a004_invoice_additional_fields::service::integration_status(&query.invoice, query.doctype)
        .await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to read integration status of {}: {}", query.invoice, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/invoice_fix_rejection
pub async fn save_draft(
    Json(draft): Json<RejectionFixDraft>,
) -> Result<Json<SavedFixRejection>, (StatusCode, String)> {
    a005_invoice_fix_rejection::service::save_draft(draft)
        .await
        .map(Json)
        .map_err(|e| failure("Failed to save rejection fix", e))
}

/// GET /api/invoice_fix_rejection/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<InvoiceFixRejection>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match a005_invoice_fix_rejection::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load rejection fix {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/method/fix_rejection
pub async fn fix_rejection(
    Json(request): Json<FixRejectionRequest>,
) -> Result<Json<FixRejectionResponse>, (StatusCode, String)> {
    a005_invoice_fix_rejection::service::fix_rejection(request)
        .await
        .map(Json)
        .map_err(|e| failure("Rejection fix failed", e))
}

/// POST /api/method/fix_rejection/testdata
pub async fn insert_test_data() -> StatusCode {
    match a004_invoice_additional_fields::service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to insert additional fields test data: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
