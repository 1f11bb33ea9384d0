//! Business Settings Details UI Module
//!
//! MVVM split:
//! - model.rs: API functions (fetch, save, onboarding calls)
//! - view_model.rs: form state, dependent fields and commands
//! - view.rs: Leptos component (pure UI)

mod model;
mod view;
mod view_model;

pub use view::BusinessSettingsDetails;
