//! Room node firmware library.
//!
//! Exposes the control core and adapters for integration testing. All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod actuation;
pub mod app;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod pins;
pub mod scheduler;
pub mod telemetry;

// Hardware-facing modules; host builds get simulation stubs.
pub mod adapters;
pub mod drivers;
pub mod sensors;
