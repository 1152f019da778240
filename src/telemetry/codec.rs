//! Wire schema for the `/sensors_data` exchange.
//!
//! ```text
//! request   {"temperature": <number>, "presence": <0|1>}
//! response  {"fan": "on"|"off", "light": "on"|"off"}
//! ```
//!
//! Decoding is all-or-nothing: a response missing either field, or carrying
//! any value other than the exact strings `"on"` / `"off"`, is rejected.
//! Unknown extra fields are ignored.  Anything but a JSON object (arrays,
//! scalars, `null`) is rejected before field decoding.

use serde::{Deserialize, Serialize};

use crate::app::commands::ActuationCommand;
use crate::error::ReportError;
use crate::sensors::SensorReading;

/// Request body.  Field order is the serialised order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingPayload {
    pub temperature: f32,
    pub presence: u8,
}

impl From<&SensorReading> for ReadingPayload {
    fn from(r: &SensorReading) -> Self {
        Self {
            temperature: r.temperature_c,
            presence: u8::from(r.presence),
        }
    }
}

impl ReadingPayload {
    /// The reading this payload describes (server-side view).
    pub fn to_reading(self) -> SensorReading {
        SensorReading {
            temperature_c: self.temperature,
            presence: self.presence != 0,
        }
    }
}

/// Serialise a reading as the compact JSON request body.
pub fn encode_reading(reading: &SensorReading) -> Result<Vec<u8>, ReportError> {
    serde_json::to_vec(&ReadingPayload::from(reading)).map_err(|_| ReportError::EncodeFailure)
}

/// Decode a 200 response body into a complete command.
///
/// Only a JSON object is accepted; serde would otherwise also take the
/// struct in sequence form (`["on","off"]`).
pub fn decode_command(body: &[u8]) -> Result<ActuationCommand, ReportError> {
    let first = body.iter().find(|&&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
    if first != Some(&b'{') {
        return Err(ReportError::DecodeFailure);
    }
    serde_json::from_slice(body).map_err(|_| ReportError::DecodeFailure)
}
