pub mod appointment_services;
pub mod appointments;
pub mod audit_logs;
pub mod barbers;
pub mod services;
pub mod settings;
pub mod users;

pub use appointment_services::Entity as AppointmentServices;
pub use appointments::Entity as Appointments;
pub use audit_logs::Entity as AuditLogs;
pub use barbers::Entity as Barbers;
pub use services::Entity as Services;
pub use settings::Entity as Settings;
pub use users::Entity as Users;
