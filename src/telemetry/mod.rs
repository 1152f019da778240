//! Telemetry reporting: the JSON wire schema and the per-tick round trip.

pub mod codec;
pub mod reporter;

pub use reporter::TelemetryReporter;
