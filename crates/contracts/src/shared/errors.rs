use thiserror::Error;

use crate::usecases::u501_feedback::attachments::UploadRejection;

/// Local contract violation detected before any remote call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Subject is required")]
    MissingSubject,

    #[error("Description is required")]
    MissingDescription,

    #[error("Description must be less than {max} characters (got {length})")]
    DescriptionTooLong { length: usize, max: usize },

    #[error("Too many attachments: {count} staged, at most {max} allowed")]
    TooManyAttachments { count: usize, max: usize },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{0} is required")]
    Required(String),

    #[error("{0}")]
    Rule(String),
}

/// Every way a user action in the compliance workflows can end badly.
///
/// All variants are terminal for the current action and are shown to the user
/// as a notice; nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Feedback settings are unavailable: {0}")]
    ConfigUnavailable(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UploadRejected(#[from] UploadRejection),

    #[error("{message}")]
    RemoteSubmissionFailed { message: String },

    #[error("{0}")]
    PrerequisiteMissing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::DescriptionTooLong { length: 501, max: 500 };
        assert_eq!(
            err.to_string(),
            "Description must be less than 500 characters (got 501)"
        );
        assert_eq!(
            ValidationError::Required("Fix reason".into()).to_string(),
            "Fix reason is required"
        );
    }

    #[test]
    fn test_workflow_error_wraps_validation() {
        let err: WorkflowError = ValidationError::MissingSubject.into();
        assert_eq!(err.to_string(), "Subject is required");
    }
}
