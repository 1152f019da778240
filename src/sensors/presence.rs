//! HC-SR501 passive-infrared motion sensor.
//!
//! The module drives its output HIGH while motion is detected (retrigger
//! mode, hold time set by its on-board potentiometer).  One GPIO read per
//! sample; no debouncing is needed at the loop rate.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::app::ports::PresencePort;

pub struct PirSensor<P> {
    pin: P,
}

impl<P: InputPin> PirSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> PresencePort for PirSensor<P> {
    fn is_present(&mut self) -> bool {
        // A failed GPIO read counts as "no motion".
        self.pin.is_high().unwrap_or_else(|e| {
            warn!("PIR: read failed ({:?})", e.kind());
            false
        })
    }
}
