//! Client library for the rehome device-reuse platform
//!
//! Wraps the backend REST contract behind the [`gateway::Gateway`] trait and
//! drives the device/request lifecycle through
//! [`workflow::WorkflowEngine`]. The backend of record stays authoritative
//! for every transition; this crate only requests them and applies the
//! server's echo.

pub mod gateway;
pub mod workflow;

pub use rehome_core::{Error, Result};
