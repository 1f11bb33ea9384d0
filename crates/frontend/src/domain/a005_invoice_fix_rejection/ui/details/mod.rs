//! Invoice Fix Rejection Details UI Module
//!
//! - model.rs: lookups of rejected invoices, amounts and status; save and resubmit
//! - view_model.rs: draft state and the confirm-then-resubmit flow
//! - view.rs: form with the line amounts table

mod model;
mod view;
mod view_model;

pub use view::InvoiceFixRejectionDetails;
