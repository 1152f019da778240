//! Inbound actuation commands.
//!
//! The reporting service answers every telemetry POST with the desired
//! state of both outputs.  Raw `"on"` / `"off"` strings are decoded here, at
//! the protocol boundary, and nothing past this module compares strings.

use serde::{Deserialize, Serialize};

/// Desired state of one binary output.  Wire form is exactly `"on"` / `"off"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Server-directed state for both outputs.  Only ever built from a fully
/// decoded response; there is no partial command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuationCommand {
    pub fan: SwitchState,
    pub light: SwitchState,
}

impl ActuationCommand {
    pub fn new(fan: SwitchState, light: SwitchState) -> Self {
        Self { fan, light }
    }
}
