//! Application core — the data model and port boundary, zero I/O.
//!
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping the control core fully testable without real
//! peripherals.

pub mod commands;
pub mod device;
pub mod events;
pub mod ports;
