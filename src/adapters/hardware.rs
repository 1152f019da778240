//! Hardware adapter — bridges the fan and light switches to [`ActuatorPort`].
//!
//! This is the only module that writes the actuator GPIOs.  Each output is a
//! [`SwitchDriver`] over an `embedded_hal` output pin, so the same adapter
//! runs over `esp_idf_hal::gpio::PinDriver` on target and mock pins on host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::ActuatorPort;
use crate::drivers::switch::SwitchDriver;

/// Light self-test pulse: on, then off, each for this long.
pub const SELF_TEST_PULSE_MS: u32 = 1000;

/// Concrete adapter owning both actuator outputs.
pub struct HardwareAdapter<F, L> {
    fan: SwitchDriver<F>,
    light: SwitchDriver<L>,
}

impl<F: OutputPin, L: OutputPin> HardwareAdapter<F, L> {
    /// Both outputs are driven off before this returns.
    pub fn new(fan_pin: F, light_pin: L) -> Self {
        Self {
            fan: SwitchDriver::new(fan_pin, "fan"),
            light: SwitchDriver::new(light_pin, "light"),
        }
    }

    /// Flash the light once so an installer can see the output works.
    pub fn self_test(&mut self, delay: &mut impl DelayNs) {
        self.light.set(true);
        delay.delay_ms(SELF_TEST_PULSE_MS);
        self.light.set(false);
        delay.delay_ms(SELF_TEST_PULSE_MS);
    }

    pub fn is_fan_on(&self) -> bool {
        self.fan.is_on()
    }

    pub fn is_light_on(&self) -> bool {
        self.light.is_on()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<F: OutputPin, L: OutputPin> ActuatorPort for HardwareAdapter<F, L> {
    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn set_light(&mut self, on: bool) {
        self.light.set(on);
    }
}
