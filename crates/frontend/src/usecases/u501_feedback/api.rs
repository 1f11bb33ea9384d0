use contracts::shared::api::{self, RemoteEnvelope};
use contracts::usecases::u501_feedback::{
    AttachmentRef, FeedbackSettings, SendFeedbackRequest, UploadRejection,
};
use gloo_net::http::Request;
use web_sys::FormData;

use crate::shared::api_utils::{api_url, error_text, get_json, post_json};

/// Limits and links for a new dialog session
pub async fn fetch_settings() -> Result<FeedbackSettings, String> {
    get_json(api::FEEDBACK_SETTINGS).await
}

/// Uploads one picked file as the multipart `file` field
pub async fn upload_file(file: web_sys::File) -> Result<AttachmentRef, UploadRejection> {
    let transfer = |e: String| UploadRejection::Transfer(e);

    let form_data = FormData::new().map_err(|e| transfer(format!("{e:?}")))?;
    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| transfer(format!("{e:?}")))?;

    let response = Request::post(&api_url(api::UPLOAD_FILE))
        .body(form_data)
        .map_err(|e| transfer(e.to_string()))?
        .send()
        .await
        .map_err(|e| transfer(e.to_string()))?;

    if !response.ok() {
        return Err(transfer(error_text(response).await));
    }

    response
        .json::<AttachmentRef>()
        .await
        .map_err(|e| transfer(format!("Failed to parse response: {}", e)))
}

/// Sends the feedback. `Err` is a transport failure; a server-side failure
/// arrives as `Ok` with `success=false`.
pub async fn send_feedback(request: &SendFeedbackRequest) -> Result<RemoteEnvelope, String> {
    post_json(api::FEEDBACK_SEND, request).await
}
