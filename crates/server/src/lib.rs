//! pass.in registration service library.
//!
//! Registration admission and attendee listing for events, served over HTTP.
//! The binary in `main.rs` wires this library to `PostgreSQL`; tests wire it
//! to the in-memory store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
