//! Unified error types for the RoomNode firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's diagnostics uniform.  All variants are `Copy` so they can
//! be carried inside [`AppEvent`](crate::app::events::AppEvent)s without
//! allocation.  Nothing here is fatal once the control loop is running.

use core::fmt;

use crate::app::ports::TransportError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature probe could not produce a valid reading.
    Sensor(SensorError),
    /// The network link is down or could not be brought up.
    Link(LinkError),
    /// The telemetry round trip failed.
    Report(ReportError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Report(e) => write!(f, "report: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The probe returned the disconnected-sensor sentinel.
    Disconnected,
    /// The conversion did not complete within the configured bound.
    ConversionTimeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "temperature probe disconnected"),
            Self::ConversionTimeout => write!(f, "temperature conversion timed out"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The station is not associated; the sense/report path is suppressed.
    Unavailable,
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    /// The driver rejected the connect / reconnect request.
    ConnectFailed,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "WiFi link unavailable"),
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ConnectFailed => write!(f, "WiFi connect request failed"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// The service answered with a status other than 200.
    HttpFailure(u16),
    /// The response body did not match `{"fan": "on"|"off", "light": "on"|"off"}`.
    DecodeFailure,
    /// The reading could not be serialised.
    EncodeFailure,
    /// The request never produced a status line.
    Transport(TransportError),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpFailure(code) => write!(f, "HTTP POST failed with status {code}"),
            Self::DecodeFailure => write!(f, "response body could not be decoded"),
            Self::EncodeFailure => write!(f, "reading could not be encoded"),
            Self::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl From<ReportError> for Error {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

impl From<TransportError> for ReportError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
