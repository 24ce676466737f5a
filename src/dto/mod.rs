pub mod appointments;
pub mod auth;
pub mod barbers;
pub mod reports;
pub mod services;
pub mod settings;
