//! Core types for pass.in.
//!
//! This module provides type-safe wrappers for the registration domain.

pub mod capacity;
pub mod email;
pub mod id;
pub mod name;
pub mod page;

pub use capacity::{Capacity, CapacityError};
pub use email::{Email, EmailError};
pub use id::*;
pub use name::{AttendeeName, AttendeeNameError};
pub use page::{PAGE_SIZE, PageIndex};
