//! Feedback dialog
//!
//! - api.rs: settings fetch, attachment upload, send
//! - view_model.rs: reactive wrapper over one `FeedbackSession`
//! - view.rs: the dialog component
//! - launcher.rs: opening rules and the dialog host

pub mod api;
pub mod launcher;
pub mod view;
pub mod view_model;

pub use launcher::{FeedbackDialogHost, FeedbackLauncher};
