//! Sensor acquisition — temperature conversion with validity checking and
//! the PIR presence sample.
//!
//! [`SensorAcquisition`] owns the probe (and with it the one-wire bus) and
//! the presence input.  It does not retry: a failed temperature read is
//! returned to the scheduler, which skips the tick and tries again on the
//! next one.

pub mod presence;
pub mod temperature;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::ports::{PresencePort, TemperatureProbe};
use crate::config::NodeConfig;
use crate::error::SensorError;

/// One tick's worth of sensor data.  Built, reported and dropped within the
/// same tick; `temperature_c` is always a validated probe value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub presence: bool,
}

/// Exclusive owner of the sensor bus and the PIR input.
pub struct SensorAcquisition<P, M> {
    probe: P,
    presence: M,
    poll_interval_ms: u32,
    conversion_timeout_ms: Option<u32>,
}

impl<P: TemperatureProbe, M: PresencePort> SensorAcquisition<P, M> {
    pub fn new(probe: P, presence: M, config: &NodeConfig) -> Self {
        Self {
            probe,
            presence,
            poll_interval_ms: config.conversion_poll_ms.max(1),
            conversion_timeout_ms: config.conversion_timeout_ms,
        }
    }

    /// Trigger a conversion, poll until it completes, and validate the value.
    ///
    /// Blocks for the conversion time.  With `conversion_timeout_ms = None`
    /// the wait is unbounded.
    pub fn read_temperature(&mut self, delay: &mut impl DelayNs) -> Result<f32, SensorError> {
        self.probe.request_conversion();

        let mut waited_ms: u32 = 0;
        while !self.probe.is_conversion_complete() {
            if let Some(limit) = self.conversion_timeout_ms {
                if waited_ms >= limit {
                    warn!("Probe: conversion still pending after {}ms", waited_ms);
                    return Err(SensorError::ConversionTimeout);
                }
            }
            delay.delay_ms(self.poll_interval_ms);
            waited_ms = waited_ms.saturating_add(self.poll_interval_ms);
        }

        let celsius = temperature::validate(self.probe.read_celsius())?;
        debug!("Probe: {:.4}\u{00b0}C after {}ms", celsius, waited_ms);
        Ok(celsius)
    }

    /// Sample the PIR input once.
    pub fn read_presence(&mut self) -> bool {
        self.presence.is_present()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }
}
