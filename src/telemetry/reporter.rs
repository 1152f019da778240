//! Telemetry reporter — one POST per tick, command decoded from the reply.
//!
//! The HTTP connection is opened at the start of [`TelemetryReporter::report`]
//! and held in a local, so it is released on every return path.  Nothing is
//! reused across ticks.

use log::{debug, info};

use super::codec;
use crate::app::commands::ActuationCommand;
use crate::app::ports::{HttpConnection, HttpConnector};
use crate::error::ReportError;
use crate::sensors::SensorReading;

/// Route appended to the configured endpoint.
pub const REPORT_PATH: &str = "/sensors_data";

/// The only status treated as success.
pub const HTTP_OK: u16 = 200;

const JSON_HEADERS: [(&str, &str); 1] = [("Content-Type", "application/json")];

pub struct TelemetryReporter<C> {
    connector: C,
    url: String,
    reports_sent: u32,
}

impl<C: HttpConnector> TelemetryReporter<C> {
    pub fn new(connector: C, endpoint: &str) -> Self {
        let url = format!("{}{}", endpoint.trim_end_matches('/'), REPORT_PATH);
        info!("Reporter: target {}", url);
        Self {
            connector,
            url,
            reports_sent: 0,
        }
    }

    /// POST `reading` and decode the actuation command from a 200 reply.
    pub fn report(&mut self, reading: &SensorReading) -> Result<ActuationCommand, ReportError> {
        let body = codec::encode_reading(reading)?;
        debug!("Reporter: POST {} {}", self.url, String::from_utf8_lossy(&body));

        let mut conn = self.connector.connect()?;
        let response = conn.post(&self.url, &JSON_HEADERS, &body)?;
        drop(conn);
        self.reports_sent = self.reports_sent.wrapping_add(1);

        debug!(
            "Reporter: {} {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        );
        if response.status != HTTP_OK {
            return Err(ReportError::HttpFailure(response.status));
        }
        codec::decode_command(&response.body)
    }

    /// Full URL every report is POSTed to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Round trips that produced a status line.
    pub fn reports_sent(&self) -> u32 {
        self.reports_sent
    }
}
