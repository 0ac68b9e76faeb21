pub mod auth_service;
pub mod import_service;
