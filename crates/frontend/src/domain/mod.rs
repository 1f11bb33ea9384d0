pub mod a001_business_settings;
pub mod a002_phase1_business_settings;
pub mod a003_company;
pub mod a005_invoice_fix_rejection;
pub mod a006_customer;
pub mod a007_branch;
