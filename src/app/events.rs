//! Outbound diagnostic events.
//!
//! The [`ControlLoop`](crate::scheduler::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial today, anything else later.

use crate::app::commands::ActuationCommand;
use crate::error::Error;
use crate::sensors::SensorReading;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The link was observed up (first connection or restored).
    LinkUp,

    /// The link was observed lost.
    LinkDown,

    /// A reconnect request was issued; `attempt` counts since the loss.
    ReconnectIssued { attempt: u32 },

    /// A valid reading was acquired and is about to be reported.
    Reading(SensorReading),

    /// A decoded command was written to the outputs.
    CommandApplied(ActuationCommand),

    /// A tick-local failure.  Outputs are left as they were.
    Fault(Error),
}
