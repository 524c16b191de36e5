//! Business logic layer.
//!
//! Services sit between the HTTP handlers and the [`crate::store::AttendeeStore`].
//! They borrow the store for the length of one request and own every
//! business rule: handlers only parse input and map outcomes to responses.

pub mod attendees;
pub mod registration;

pub use attendees::{AttendeePage, AttendeeQueryService};
pub use registration::{RegistrationError, RegistrationService};
