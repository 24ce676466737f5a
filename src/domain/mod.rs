//! Booking rules shared by the HTTP server and the API client.
//!
//! Nothing in here touches the database or the network: every function takes
//! already-fetched data and answers a question about it.

pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod format;
pub mod pricing;
pub mod review;
pub mod role;
pub mod schedule;
pub mod status;

pub use availability::{SlotError, WorkingHours, available_slots, is_slot_available};
pub use pricing::{BookingTotals, Priced, checked_totals, totals};
pub use review::{ReviewError, can_review, check_review};
pub use role::Role;
pub use status::{AppointmentStatus, StatusAction, available_actions};
