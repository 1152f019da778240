//! Port traits — the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ connectivity / sensors / telemetry / actuation
//! ```
//!
//! Driven adapters (probe, PIR input, WiFi, HTTP client, relays, log sink)
//! implement these traits.  The core components consume them via generics,
//! so nothing above this line touches hardware directly.  Blocking waits go
//! through [`embedded_hal::delay::DelayNs`] rather than a port of our own.

use core::fmt;

use crate::error::LinkError;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → core)
// ───────────────────────────────────────────────────────────────

/// A temperature probe that converts on request.
pub trait TemperatureProbe {
    /// Start a conversion.  Returns immediately.
    fn request_conversion(&mut self);

    /// Non-blocking check whether the last requested conversion finished.
    fn is_conversion_complete(&mut self) -> bool;

    /// Latest converted value in °C, calibration applied.
    ///
    /// Returns [`DISCONNECTED_C`](crate::sensors::temperature::DISCONNECTED_C)
    /// when the probe is unreachable.
    fn read_celsius(&mut self) -> f32;
}

/// Passive-infrared motion input.
pub trait PresencePort {
    /// Single instantaneous sample.  Cannot fail.
    fn is_present(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Link port (driven adapter: core ↔ WiFi station)
// ───────────────────────────────────────────────────────────────

/// Link-layer connectivity.  Every method is non-blocking.
pub trait LinkPort {
    /// Configure and start the station, then issue the first connect.
    fn begin(&mut self) -> Result<(), LinkError>;

    /// Whether the station is associated and has an address.
    fn is_link_up(&self) -> bool;

    /// Fire a reconnect request; success is observed later via
    /// [`is_link_up`](Self::is_link_up).
    fn request_reconnect(&mut self) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// HTTP ports (driven adapter: core → reporting endpoint)
// ───────────────────────────────────────────────────────────────

/// Opens one HTTP connection per round trip.
///
/// The returned connection is released when dropped, so a caller that holds
/// it in a local releases it on every exit path.
pub trait HttpConnector {
    type Connection: HttpConnection;

    fn connect(&mut self) -> Result<Self::Connection, TransportError>;
}

/// A single open HTTP connection.
pub trait HttpConnection {
    /// POST `body` to `url` and collect the full response.
    fn post(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, TransportError>;
}

/// Status and body of a completed round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Failures below the HTTP status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be created or the request not started.
    Connect,
    /// Reading or writing the stream failed (includes timeouts).
    Io,
    /// The response body exceeded the adapter's buffer bound.
    BodyTooLarge,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connection failed"),
            Self::Io => write!(f, "I/O error"),
            Self::BodyTooLarge => write!(f, "response body too large"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: core → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-only view of the two binary outputs.
pub trait ActuatorPort {
    fn set_fan(&mut self, on: bool);
    fn set_light(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging)
// ───────────────────────────────────────────────────────────────

/// The scheduler emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
