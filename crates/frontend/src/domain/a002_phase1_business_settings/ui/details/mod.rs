//! Phase 1 Business Settings Details UI Module

mod model;
mod view;
mod view_model;

pub use view::Phase1BusinessSettingsDetails;
