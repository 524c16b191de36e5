//! pass.in Core - Shared types library.
//!
//! This crate provides the domain types used across all pass.in components:
//! - `server` - Registration and attendee listing HTTP service
//! - `cli` - Command-line tools for migrations and event management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Parsing a value into one of these types is the input validation step:
//! once a request holds an [`Email`] or [`AttendeeName`], the services can
//! assume it is well formed.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, names, capacities, and pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
