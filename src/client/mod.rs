//! Client side of the booking API: a typed HTTP client, the durable session,
//! booking-flow state, appointment status actions and screen guards.

pub mod access;
pub mod admin;
pub mod api;
pub mod appointments;
pub mod auth;
pub mod barbers;
pub mod board;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod notice;
pub mod session;

pub use access::{Access, Guard, check, check_stored, required_access};
pub use api::ApiClient;
pub use appointments::AppointmentPage;
pub use board::AppointmentBoard;
pub use booking::{BookingDraft, BookingError, SlotPicker, SlotTicket, booking_dates, submit};
pub use error::{ClientError, ClientResult};
pub use notice::{Notice, NoticeKind, NoticeSlot};
pub use session::{Session, SessionManager, SessionStore};
