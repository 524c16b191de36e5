//! Domain models for the registration service.

pub mod attendee;
pub mod event;

pub use attendee::{Attendee, AttendeeView, CheckIn, NewAttendee};
pub use event::{Event, NewEvent};
