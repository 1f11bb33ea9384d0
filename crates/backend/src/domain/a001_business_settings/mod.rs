pub mod compliance_client;
pub mod repository;
pub mod service;
