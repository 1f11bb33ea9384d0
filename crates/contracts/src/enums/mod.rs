pub mod integration_status;
pub mod invoice_type;

pub use integration_status::IntegrationStatus;
pub use invoice_type::InvoiceType;
