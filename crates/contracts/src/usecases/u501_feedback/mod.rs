//! Feedback submission workflow.
//!
//! Everything here is pure and UI-agnostic: the client wraps a
//! [`session::FeedbackSession`] in reactive state, the server reuses the
//! settings and restriction checks to re-validate what it receives.

pub mod attachments;
pub mod controller;
pub mod request;
pub mod session;
pub mod settings;
pub mod subject;
pub mod suppression;
pub mod validation;

pub use attachments::{AttachmentRef, AttachmentStagingBuffer, UploadRejection, UploadRestrictions};
pub use controller::{CancelOutcome, DialogMode, GuardedActionController, SubmissionPhase};
pub use request::{FeedbackDraft, SendFeedbackRequest};
pub use session::{FeedbackSession, SubmitStart};
pub use settings::FeedbackSettings;
pub use subject::FeedbackSubject;
pub use suppression::{SuppressionRecord, SUPPRESSION_STORAGE_KEY};
