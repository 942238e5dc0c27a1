//! Core library for the rehome device-reuse platform client
//!
//! This crate contains the client-side business logic, including:
//! - Domain entities and their lifecycle rules
//! - Session management
//! - Role-gated access checks

pub mod access;
pub mod device;
pub mod error;
pub mod profile;
pub mod request;
pub mod session;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
