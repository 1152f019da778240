//! Actuation controller — writes a decoded command to the fan and light.
//!
//! Unconditional overwrite of both outputs; applying the same command twice
//! is the same as applying it once.  The scheduler only calls [`apply`] after
//! a successful report, so a failed tick leaves the outputs untouched.
//!
//! [`apply`]: ActuationController::apply

use log::info;

use crate::app::commands::ActuationCommand;
use crate::app::ports::ActuatorPort;

pub struct ActuationController<A> {
    outputs: A,
    applied: u32,
}

impl<A: ActuatorPort> ActuationController<A> {
    pub fn new(outputs: A) -> Self {
        Self {
            outputs,
            applied: 0,
        }
    }

    pub fn apply(&mut self, command: ActuationCommand) {
        self.outputs.set_fan(command.fan.is_on());
        self.outputs.set_light(command.light.is_on());
        self.applied = self.applied.wrapping_add(1);
        info!(
            "Outputs: fan={} light={}",
            if command.fan.is_on() { "cooling" } else { "idle" },
            if command.light.is_on() { "on" } else { "off" },
        );
    }

    /// Commands applied since boot.
    pub fn applied_count(&self) -> u32 {
        self.applied
    }

    pub fn outputs(&self) -> &A {
        &self.outputs
    }
}
