pub mod address_repository;
pub mod repository;
pub mod service;
