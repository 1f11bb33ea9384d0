//! Branch Details UI Module
//!
//! The address list follows the selected company, the same way the
//! business settings form does.

mod model;
mod view;
mod view_model;

pub use view::BranchDetails;
