//! Control loop scheduler.
//!
//! A single cooperative loop; each pass ("tick") blocks the device for its
//! whole duration.  There is no termination condition.
//!
//! ```text
//! ┌──────────────────────────── tick ─────────────────────────────┐
//! │                                                               │
//! │  is_connected? ──no──▶ reconnect() ─▶ reconnect delay ──┐     │
//! │       │                                                 │     │
//! │      yes                                                │     │
//! │       ▼                                                 │     │
//! │  read_temperature ──err──▶ skip delay ─▶ (tick ends)    │     │
//! │       │                                                 │     │
//! │       ▼                                                 │     │
//! │  read_presence ─▶ report ──ok──▶ apply                  │     │
//! │                     │ err (outputs untouched)           │     │
//! │                     ▼                                   │     │
//! │                cycle delay ─────────────────────────────┤     │
//! │                                                         ▼     │
//! │                                               trailing delay  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;

use crate::app::commands::ActuationCommand;
use crate::app::device::Device;
use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, EventSink, HttpConnector, LinkPort, PresencePort, TemperatureProbe};
use crate::config::NodeConfig;
use crate::connectivity::ConnectivityState;
use crate::error::{Error, LinkError, ReportError, SensorError};
use crate::sensors::SensorReading;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Link down; a reconnect was issued.
    Offline { attempt: u32 },
    /// The temperature read failed; nothing was reported.
    SensorFault(SensorError),
    /// The round trip failed; outputs were left as they were.
    ReportFailed(ReportError),
    /// A command was decoded and applied.
    Applied(ActuationCommand),
}

/// Fixed inter-tick delays, copied out of [`NodeConfig`].
#[derive(Debug, Clone, Copy)]
struct LoopTiming {
    sensor_retry_delay_ms: u32,
    cycle_delay_ms: u32,
    reconnect_delay_ms: u32,
    trailing_delay_ms: u32,
}

pub struct ControlLoop {
    timing: LoopTiming,
    ticks: u64,
}

impl ControlLoop {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            timing: LoopTiming {
                sensor_retry_delay_ms: config.sensor_retry_delay_ms,
                cycle_delay_ms: config.cycle_delay_ms,
                reconnect_delay_ms: config.reconnect_delay_ms,
                trailing_delay_ms: config.trailing_delay_ms,
            },
            ticks: 0,
        }
    }

    /// Run ticks forever.
    pub fn run<P, M, L, C, A>(
        &mut self,
        device: &mut Device<P, M, L, C, A>,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> !
    where
        P: TemperatureProbe,
        M: PresencePort,
        L: LinkPort,
        C: HttpConnector,
        A: ActuatorPort,
    {
        loop {
            self.tick(device, delay, sink);
        }
    }

    /// One pass: sense → report → actuate when online, reconnect otherwise.
    pub fn tick<P, M, L, C, A>(
        &mut self,
        device: &mut Device<P, M, L, C, A>,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> TickOutcome
    where
        P: TemperatureProbe,
        M: PresencePort,
        L: LinkPort,
        C: HttpConnector,
        A: ActuatorPort,
    {
        self.ticks += 1;

        let was_connected = device.link.state() == ConnectivityState::Connected;
        let connected = device.link.is_connected();
        if connected != was_connected {
            sink.emit(if connected {
                &AppEvent::LinkUp
            } else {
                &AppEvent::LinkDown
            });
        }

        let outcome = if connected {
            match device.sensors.read_temperature(delay) {
                Ok(temperature_c) => {
                    let reading = SensorReading {
                        temperature_c,
                        presence: device.sensors.read_presence(),
                    };
                    let outcome = Self::report_and_apply(device, &reading, sink);
                    delay.delay_ms(self.timing.cycle_delay_ms);
                    outcome
                }
                Err(e) => {
                    sink.emit(&AppEvent::Fault(Error::Sensor(e)));
                    delay.delay_ms(self.timing.sensor_retry_delay_ms);
                    // The tick ends here, trailing delay included.
                    return TickOutcome::SensorFault(e);
                }
            }
        } else {
            sink.emit(&AppEvent::Fault(Error::Link(LinkError::Unavailable)));
            let attempt = device.link.reconnect();
            sink.emit(&AppEvent::ReconnectIssued { attempt });
            delay.delay_ms(self.timing.reconnect_delay_ms);
            TickOutcome::Offline { attempt }
        };

        delay.delay_ms(self.timing.trailing_delay_ms);
        outcome
    }

    fn report_and_apply<P, M, L, C, A>(
        device: &mut Device<P, M, L, C, A>,
        reading: &SensorReading,
        sink: &mut impl EventSink,
    ) -> TickOutcome
    where
        C: HttpConnector,
        A: ActuatorPort,
    {
        sink.emit(&AppEvent::Reading(*reading));
        match device.reporter.report(reading) {
            Ok(command) => {
                device.actuators.apply(command);
                sink.emit(&AppEvent::CommandApplied(command));
                TickOutcome::Applied(command)
            }
            Err(e) => {
                sink.emit(&AppEvent::Fault(Error::Report(e)));
                TickOutcome::ReportFailed(e)
            }
        }
    }

    /// Ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}
