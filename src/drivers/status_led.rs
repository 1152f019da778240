//! Single-colour status LED.
//!
//! Lit for one second and then dark for one second at power-on, so a
//! board that resets in a loop is visible from across the room.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp_idf_hal` `PinDriver` on GPIO2.
//! On host/test: any `OutputPin` mock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::switch::SwitchDriver;

pub const BOOT_ON_MS: u32 = 1000;
pub const BOOT_OFF_MS: u32 = 1000;

pub struct StatusLed<P> {
    out: SwitchDriver<P>,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self {
            out: SwitchDriver::new(pin, "status-led"),
        }
    }

    /// One on/off pulse.  Blocks for `on_ms + off_ms`.
    pub fn pulse(&mut self, delay: &mut impl DelayNs, on_ms: u32, off_ms: u32) {
        self.out.set(true);
        delay.delay_ms(on_ms);
        self.out.set(false);
        delay.delay_ms(off_ms);
    }

    pub fn boot_indication(&mut self, delay: &mut impl DelayNs) {
        self.pulse(delay, BOOT_ON_MS, BOOT_OFF_MS);
    }

    pub fn is_on(&self) -> bool {
        self.out.is_on()
    }
}
