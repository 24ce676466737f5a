pub mod appointment_service;
pub mod auth_service;
pub mod barber_service;
pub mod catalog_service;
pub mod report_service;
pub mod settings_service;
