//! The device context.
//!
//! Every hardware handle the control loop touches is owned here, built once
//! at boot and passed explicitly to the [`ControlLoop`](crate::scheduler::ControlLoop).
//! There is no global hardware state.

use crate::actuation::ActuationController;
use crate::connectivity::ConnectivityManager;
use crate::sensors::SensorAcquisition;
use crate::telemetry::TelemetryReporter;

/// Exclusively-owned bundle of the four components a tick sequences.
pub struct Device<P, M, L, C, A> {
    /// Probe and PIR input.  Owns the one-wire bus.
    pub sensors: SensorAcquisition<P, M>,
    /// WiFi station state.
    pub link: ConnectivityManager<L>,
    /// Reporting endpoint client.
    pub reporter: TelemetryReporter<C>,
    /// Fan and light outputs.
    pub actuators: ActuationController<A>,
}

impl<P, M, L, C, A> Device<P, M, L, C, A> {
    pub fn new(
        sensors: SensorAcquisition<P, M>,
        link: ConnectivityManager<L>,
        reporter: TelemetryReporter<C>,
        actuators: ActuationController<A>,
    ) -> Self {
        Self {
            sensors,
            link,
            reporter,
            actuators,
        }
    }
}
