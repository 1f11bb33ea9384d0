pub mod a001_business_settings;
pub mod a002_phase1_business_settings;
pub mod a003_company;
pub mod a005_invoice_fix_rejection;
pub mod a006_customer;
pub mod a007_branch;
pub mod files;
pub mod u501_feedback;

use axum::http::StatusCode;
use contracts::shared::errors::{ValidationError, WorkflowError};

/// Maps a service error onto a status and the message shown to the user:
/// workflow and validation failures are 422, everything else is logged as 500
pub(crate) fn failure(context: &str, e: anyhow::Error) -> (StatusCode, String) {
    if e.is::<WorkflowError>() || e.is::<ValidationError>() {
        tracing::warn!("{}: {}", context, e);
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }
    tracing::error!("{}: {:#}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_status() {
        let err = anyhow::Error::new(WorkflowError::PrerequisiteMissing(
            "Please Onboard first to generate a compliance request ID".into(),
        ));
        let (status, message) = failure("production csid", err);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            message,
            "Please Onboard first to generate a compliance request ID"
        );

        let (status, _) = failure("db", anyhow::anyhow!("disk full"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
