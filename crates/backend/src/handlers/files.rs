use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;
use contracts::usecases::u501_feedback::{AttachmentRef, UploadRejection};

use crate::shared::files::service;

/// POST /api/method/upload_file
///
/// Rejected files answer 422 with the reason as plain text.
pub async fn upload(
    mut multipart: Multipart,
) -> Result<Json<AttachmentRef>, (StatusCode, String)> {
    match service::upload(&mut multipart).await {
        Ok(attachment) => Ok(Json(attachment)),
        Err(e) => {
            if let Some(rejection) = e.downcast_ref::<UploadRejection>() {
                tracing::warn!("Upload rejected: {}", rejection);
                return Err((StatusCode::UNPROCESSABLE_ENTITY, rejection.to_string()));
            }
            tracing::error!("Upload failed: {:#}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
