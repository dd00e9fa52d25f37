//! HeatLink firmware library.
//!
//! Two ESP32 boards share one bus: the remote is the operator panel
//! (enable/disable, setpoint, threshold), the local drives a heater and a
//! fan from its temperature sensor.  Each node publishes only what it
//! owns, and only when it changes.
//!
//! Exposes the pure-logic modules for integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod protocol;
pub mod state;
pub mod sync;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;

pub use error::{Error, Result};

// Host unit tests need a critical-section implementation for the
// mailboxes; the std one comes in as a dev-dependency.
#[cfg(test)]
use critical_section as _;
