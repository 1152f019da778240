//! Binary output driver (relay / logic-level MOSFET, active HIGH).
//!
//! Drives one GPIO through `embedded_hal::digital::OutputPin` and keeps
//! the last commanded level.  Dumb actuator: no debouncing, no rate limit.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp_idf_hal` `PinDriver`.
//! On host/test: any `OutputPin` mock.

use embedded_hal::digital::{Error as _, OutputPin, PinState};
use log::warn;

pub struct SwitchDriver<P> {
    pin: P,
    label: &'static str,
    on: bool,
}

impl<P: OutputPin> SwitchDriver<P> {
    /// Take ownership of `pin` and drive it low.
    pub fn new(pin: P, label: &'static str) -> Self {
        let mut driver = Self {
            pin,
            label,
            on: true,
        };
        driver.set(false);
        driver
    }

    pub fn set(&mut self, on: bool) {
        if let Err(e) = self.pin.set_state(PinState::from(on)) {
            warn!("{}: GPIO write failed ({:?})", self.label, e.kind());
            return;
        }
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
