pub mod api;
pub mod errors;
pub mod notice;
