//! DS18B20 one-wire temperature probe.
//!
//! Configured for 12-bit resolution (0.0625 °C steps, 750 ms worst-case
//! conversion) with a static calibration offset applied to every valid
//! reading.  An unreachable probe reads as [`DISCONNECTED_C`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the bus through `one-wire-bus` + `ds18b20`, and polls
//! conversion completion by reading a time slot (the probe holds the line
//! low while converting).
//! On host/test: returns an injected value after an injected number of busy
//! polls.

use crate::error::SensorError;

/// Value reported when the probe is unreachable or unwired.
pub const DISCONNECTED_C: f32 = -127.0;

/// Probe resolution.
pub const RESOLUTION_BITS: u8 = 12;

/// Temperature step at [`RESOLUTION_BITS`].
pub const RESOLUTION_STEP_C: f32 = 0.0625;

/// Accept any value except the disconnected sentinel.
#[allow(clippy::float_cmp)] // the sentinel is an exact bit pattern
pub fn validate(celsius: f32) -> Result<f32, SensorError> {
    if celsius == DISCONNECTED_C {
        Err(SensorError::Disconnected)
    } else {
        Ok(celsius)
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF driver
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod platform {
    use ds18b20::{Ds18b20, Resolution};
    use esp_idf_hal::delay::Ets;
    use esp_idf_hal::gpio::{AnyIOPin, InputOutput, PinDriver, Pull};
    use log::{info, warn};
    use one_wire_bus::{Address, OneWire};

    use super::DISCONNECTED_C;
    use crate::app::ports::TemperatureProbe;

    type Bus = OneWire<PinDriver<'static, AnyIOPin, InputOutput>>;

    pub struct Ds18b20Probe {
        bus: Bus,
        sensor: Option<Ds18b20>,
        delay: Ets,
        offset_c: f32,
        converting: bool,
        /// The current conversion never started or its status was lost;
        /// the scratchpad holds a stale value.
        conversion_failed: bool,
    }

    impl Ds18b20Probe {
        pub fn new(pin: AnyIOPin, offset_c: f32) -> anyhow::Result<Self> {
            let mut line = PinDriver::input_output_od(pin)?;
            line.set_pull(Pull::Up)?;
            line.set_high()?;

            let bus = OneWire::new(line)
                .map_err(|e| anyhow::anyhow!("one-wire bus init failed: {e:?}"))?;

            let mut probe = Self {
                bus,
                sensor: None,
                delay: Ets,
                offset_c,
                converting: false,
                conversion_failed: false,
            };
            probe.discover();
            Ok(probe)
        }

        /// Find the first DS18B20 on the bus and set its resolution.
        fn discover(&mut self) {
            let mut found: Option<Address> = None;
            for addr in self.bus.devices(false, &mut self.delay) {
                match addr {
                    Ok(address) if address.family_code() == ds18b20::FAMILY_CODE => {
                        found = Some(address);
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Probe: one-wire scan failed: {e:?}");
                        break;
                    }
                }
            }

            let Some(address) = found else {
                warn!("Probe: no DS18B20 on the bus");
                self.sensor = None;
                return;
            };

            match Ds18b20::new::<core::convert::Infallible>(address) {
                Ok(sensor) => {
                    if let Err(e) =
                        sensor.set_config(i8::MIN, i8::MAX, Resolution::Bits12, &mut self.bus, &mut self.delay)
                    {
                        warn!("Probe: resolution config failed: {e:?}");
                    }
                    info!("Probe: DS18B20 {:?} ready (12-bit, offset {:+.2})", address, self.offset_c);
                    self.sensor = Some(sensor);
                }
                Err(e) => {
                    warn!("Probe: invalid DS18B20 address {:?}: {e:?}", address);
                    self.sensor = None;
                }
            }
        }
    }

    impl TemperatureProbe for Ds18b20Probe {
        fn request_conversion(&mut self) {
            if self.sensor.is_none() {
                self.discover();
            }
            self.converting = self.sensor.is_some()
                && ds18b20::start_simultaneous_temp_measurement(&mut self.bus, &mut self.delay)
                    .map_err(|e| warn!("Probe: conversion start failed: {e:?}"))
                    .is_ok();
            self.conversion_failed = !self.converting;
        }

        fn is_conversion_complete(&mut self) -> bool {
            if !self.converting {
                return true;
            }
            // The probe answers read slots with 0 until the conversion is done.
            match self.bus.read_bit(&mut self.delay) {
                Ok(done) => {
                    self.converting = !done;
                    done
                }
                Err(e) => {
                    warn!("Probe: status read failed: {e:?}");
                    self.converting = false;
                    self.conversion_failed = true;
                    true
                }
            }
        }

        fn read_celsius(&mut self) -> f32 {
            if self.conversion_failed {
                return DISCONNECTED_C;
            }
            let Some(sensor) = self.sensor.as_ref() else {
                return DISCONNECTED_C;
            };
            match sensor.read_data(&mut self.bus, &mut self.delay) {
                Ok(data) => data.temperature + self.offset_c,
                Err(e) => {
                    warn!("Probe: scratchpad read failed: {e:?}");
                    self.sensor = None;
                    DISCONNECTED_C
                }
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod platform {
    use super::DISCONNECTED_C;
    use crate::app::ports::TemperatureProbe;

    pub struct Ds18b20Probe {
        offset_c: f32,
        raw_c: f32,
        connected: bool,
        busy_polls: u32,
        remaining_polls: u32,
        start_fails: bool,
        conversion_failed: bool,
    }

    impl Ds18b20Probe {
        pub fn new(offset_c: f32) -> Self {
            Self {
                offset_c,
                raw_c: 21.0,
                connected: true,
                busy_polls: 0,
                remaining_polls: 0,
                start_fails: false,
                conversion_failed: false,
            }
        }

        /// Raw (pre-offset) temperature the next conversion yields.
        pub fn sim_set_celsius(&mut self, raw_c: f32) {
            self.raw_c = raw_c;
        }

        pub fn sim_set_connected(&mut self, connected: bool) {
            self.connected = connected;
        }

        /// Number of polls each conversion reports as still pending.
        pub fn sim_set_busy_polls(&mut self, polls: u32) {
            self.busy_polls = polls;
        }

        /// Make conversion requests fail on the bus.
        pub fn sim_set_start_fails(&mut self, fails: bool) {
            self.start_fails = fails;
        }
    }

    impl TemperatureProbe for Ds18b20Probe {
        fn request_conversion(&mut self) {
            self.conversion_failed = self.start_fails;
            self.remaining_polls = if self.start_fails { 0 } else { self.busy_polls };
        }

        fn is_conversion_complete(&mut self) -> bool {
            if self.remaining_polls == 0 {
                return true;
            }
            self.remaining_polls -= 1;
            false
        }

        fn read_celsius(&mut self) -> f32 {
            if self.connected && !self.conversion_failed {
                self.raw_c + self.offset_c
            } else {
                DISCONNECTED_C
            }
        }
    }
}

pub use platform::Ds18b20Probe;
