use axum::Json;
use contracts::shared::api::RemoteEnvelope;
use contracts::usecases::u501_feedback::{FeedbackSettings, SendFeedbackRequest};

use crate::usecases::u501_feedback::executor;

/// GET /api/method/feedback/settings
pub async fn get_settings() -> Result<Json<FeedbackSettings>, axum::http::StatusCode> {
    match executor::shared() {
        Ok(exec) => Ok(Json(exec.settings().clone())),
        Err(e) => {
            tracing::error!("Feedback settings unavailable: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/method/feedback/send
///
/// Always answers 200; failures travel in the envelope.
pub async fn send(Json(request): Json<SendFeedbackRequest>) -> Json<RemoteEnvelope> {
    match executor::shared() {
        Ok(exec) => Json(exec.send(request).await),
        Err(e) => {
            tracing::error!("Feedback executor unavailable: {}", e);
            Json(RemoteEnvelope::failed(e.to_string()))
        }
    }
}
