use crate::shared::api::RemoteEnvelope;
use crate::shared::errors::ValidationError;
use crate::shared::notice::Notice;

use super::attachments::{AttachmentRef, AttachmentStagingBuffer, UploadRejection, UploadRestrictions};
use super::controller::{CancelOutcome, DialogMode, GuardedActionController, SubmissionPhase};
use super::request::{FeedbackDraft, SendFeedbackRequest};
use super::settings::FeedbackSettings;
use super::suppression::SuppressionRecord;
use super::validation::validate_submission;

/// Result of pressing the primary action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Validation passed and the controller moved to `Submitting`; send this.
    Send(SendFeedbackRequest),
    /// A submission is already in flight or the dialog is closed
    Ignored,
}

/// One open-to-close lifetime of the feedback dialog.
///
/// Owns its configuration snapshot, staged attachments and submit state;
/// nothing is shared between two sessions.
#[derive(Debug, Clone)]
pub struct FeedbackSession {
    config: FeedbackSettings,
    company: String,
    buffer: AttachmentStagingBuffer,
    controller: GuardedActionController,
}

impl FeedbackSession {
    pub fn open(config: FeedbackSettings, company: impl Into<String>, mode: DialogMode) -> Self {
        Self {
            config,
            company: company.into(),
            buffer: AttachmentStagingBuffer::new(),
            controller: GuardedActionController::new(mode),
        }
    }

    pub fn config(&self) -> &FeedbackSettings {
        &self.config
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn mode(&self) -> &DialogMode {
        self.controller.mode()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.controller.phase()
    }

    pub fn is_action_enabled(&self) -> bool {
        self.controller.is_action_enabled()
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        self.buffer.as_slice()
    }

    pub fn restrictions(&self) -> UploadRestrictions {
        self.config.upload_restrictions()
    }

    /// Pre-transfer check of a picked file against the session limits
    pub fn check_upload(&self, file_name: &str, size_bytes: u64) -> Result<(), UploadRejection> {
        self.restrictions()
            .check(file_name, size_bytes, self.buffer.len())
    }

    /// Records the outcome of one upload and returns the notice to show
    pub fn stage_upload(&mut self, outcome: Result<AttachmentRef, UploadRejection>) -> Notice {
        match self.buffer.accept(outcome) {
            Ok(staged) => Notice::success(format!("File uploaded: {}", staged.display_name)),
            Err(rejection) => Notice::failure(rejection.to_string()),
        }
    }

    /// Validates and, when allowed, moves to `Submitting` and returns the request
    pub fn begin_submit(&mut self, draft: &FeedbackDraft) -> Result<SubmitStart, ValidationError> {
        if !self.controller.is_action_enabled() {
            return Ok(SubmitStart::Ignored);
        }
        validate_submission(draft, self.buffer.as_slice(), &self.config)?;

        let subject = draft.subject.ok_or(ValidationError::MissingSubject)?;
        if !self.controller.try_begin() {
            return Ok(SubmitStart::Ignored);
        }

        Ok(SubmitStart::Send(SendFeedbackRequest {
            sender_email: draft.sender_email(),
            company: self.company.clone(),
            subject,
            description: draft.description.clone(),
            attachments: self.buffer.urls(),
        }))
    }

    /// Interprets the remote answer. `success=false` and a transport error are
    /// handled the same way: back to `Idle` with a failure notice; staged
    /// attachments stay for the retry.
    pub fn finish_submit(&mut self, result: Result<RemoteEnvelope, String>) -> Notice {
        match result {
            Ok(envelope) if envelope.success => {
                self.controller.succeed();
                Notice::success(envelope.message)
            }
            Ok(envelope) => {
                self.controller.fail();
                Notice::failure(format!(
                    "An error occurred while submitting your feedback: {}",
                    envelope.message
                ))
            }
            Err(transport) => {
                self.controller.fail();
                Notice::failure(format!(
                    "Failed to submit feedback. Please try again. ({})",
                    transport
                ))
            }
        }
    }

    pub fn cancel(&mut self, record: &mut SuppressionRecord) -> CancelOutcome {
        self.controller.cancel(record)
    }

    pub fn dismiss(&mut self) -> bool {
        self.controller.dismiss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notice::Indicator;
    use crate::usecases::u501_feedback::subject::FeedbackSubject;

    fn config() -> FeedbackSettings {
        FeedbackSettings {
            max_files: 3,
            max_file_size_mb: 5.0,
            allowed_file_types: [".pdf", ".png"].into_iter().map(String::from).collect(),
            max_description_length: 500,
            contact_url: "https://example.com/contact".into(),
            default_sender_email: None,
        }
    }

    fn draft() -> FeedbackDraft {
        FeedbackDraft {
            subject: Some(FeedbackSubject::ComplianceIssue),
            description: "QR code missing on simplified invoice".into(),
            contact_email: String::new(),
        }
    }

    fn staged_session() -> FeedbackSession {
        let mut session = FeedbackSession::open(config(), "ACME KSA", DialogMode::Standard);
        session.stage_upload(Ok(AttachmentRef::from_url("/files/one.pdf")));
        session.stage_upload(Ok(AttachmentRef::from_url("/files/two.png")));
        session
    }

    #[test]
    fn test_begin_submit_builds_request() {
        let mut session = staged_session();
        let start = session.begin_submit(&draft()).unwrap();
        let SubmitStart::Send(request) = start else {
            panic!("expected a request");
        };
        assert_eq!(request.company, "ACME KSA");
        assert_eq!(request.subject, FeedbackSubject::ComplianceIssue);
        assert_eq!(request.attachments, vec!["/files/one.pdf", "/files/two.png"]);
        assert_eq!(request.sender_email, None);
        assert_eq!(session.phase(), SubmissionPhase::Submitting);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_ignored() {
        let mut session = staged_session();
        session.begin_submit(&draft()).unwrap();
        assert_eq!(session.begin_submit(&draft()), Ok(SubmitStart::Ignored));
    }

    #[test]
    fn test_invalid_draft_stays_idle() {
        let mut session = staged_session();
        let bad = FeedbackDraft {
            description: "x".repeat(501),
            ..draft()
        };
        assert!(matches!(
            session.begin_submit(&bad),
            Err(ValidationError::DescriptionTooLong { .. })
        ));
        assert_eq!(session.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_remote_failure_returns_to_idle_with_message() {
        let mut session = staged_session();
        session.begin_submit(&draft()).unwrap();
        let notice = session.finish_submit(Ok(RemoteEnvelope::failed("quota exceeded")));
        assert_eq!(session.phase(), SubmissionPhase::Idle);
        assert!(session.is_action_enabled());
        assert_eq!(notice.indicator, Indicator::Red);
        assert!(notice.message.contains("quota exceeded"));
    }

    #[test]
    fn test_retry_reuses_identical_attachments() {
        let mut session = staged_session();
        let SubmitStart::Send(first) = session.begin_submit(&draft()).unwrap() else {
            panic!("expected a request");
        };
        session.finish_submit(Err("connection reset".into()));
        let SubmitStart::Send(second) = session.begin_submit(&draft()).unwrap() else {
            panic!("expected a request");
        };
        assert_eq!(first.attachments, second.attachments);
        assert_eq!(session.attachments().len(), 2);
    }

    #[test]
    fn test_success_closes_session() {
        let mut session = staged_session();
        session.begin_submit(&draft()).unwrap();
        let notice = session.finish_submit(Ok(RemoteEnvelope::ok("Feedback email sent successfully")));
        assert_eq!(session.phase(), SubmissionPhase::Closed);
        assert_eq!(notice, Notice::success("Feedback email sent successfully"));
    }

    #[test]
    fn test_stage_upload_notices() {
        let mut session = FeedbackSession::open(config(), "ACME", DialogMode::Standard);
        let ok = session.stage_upload(Ok(AttachmentRef::new("/files/x-a.pdf", "a.pdf")));
        assert_eq!(ok, Notice::success("File uploaded: a.pdf"));
        let failed = session.stage_upload(Err(UploadRejection::Transfer("timeout".into())));
        assert_eq!(failed.indicator, Indicator::Red);
        assert_eq!(session.attachments().len(), 1);
    }

    #[test]
    fn test_check_upload_counts_staged_files() {
        let mut session = staged_session();
        session.stage_upload(Ok(AttachmentRef::from_url("/files/three.pdf")));
        assert_eq!(
            session.check_upload("four.pdf", 10),
            Err(UploadRejection::TooManyFiles { max: 3 })
        );
    }

    #[test]
    fn test_prompt_cancel_suppresses_document() {
        let mut record = SuppressionRecord::default();
        let mut session = FeedbackSession::open(
            config(),
            "ACME",
            DialogMode::PostSavePrompt {
                document_id: "BS-0002".into(),
            },
        );
        session.cancel(&mut record);
        assert!(!record.should_prompt("BS-0002"));
        assert!(record.should_prompt("BS-0003"));
    }
}
