//! Node configuration parameters
//!
//! All tunable parameters for the RoomNode system.  Network values are
//! supplied at build time through environment variables; every delay the
//! control loop uses is a named field here rather than an inline literal.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Endpoint used when `ROOMNODE_ENDPOINT` is not set at build time.
pub const DEFAULT_ENDPOINT: &str = "http://192.168.1.10:8000";

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Network ---
    /// WiFi station SSID
    pub wifi_ssid: heapless::String<32>,
    /// WiFi station password (empty for open networks)
    pub wifi_password: heapless::String<64>,
    /// Base URL of the reporting service, without the route
    pub endpoint: heapless::String<128>,

    // --- Probe ---
    /// Static calibration offset added to every valid probe reading (°C)
    pub probe_offset_c: f32,

    // --- Timing ---
    /// Poll interval while waiting for the first connection (milliseconds)
    pub connect_retry_ms: u32,
    /// Pause after the first connection before the loop starts (milliseconds)
    pub connect_settle_ms: u32,
    /// Conversion-complete poll interval (milliseconds)
    pub conversion_poll_ms: u32,
    /// Upper bound on the conversion wait; `None` waits forever
    pub conversion_timeout_ms: Option<u32>,
    /// Delay after a failed temperature read before the next tick (milliseconds)
    pub sensor_retry_delay_ms: u32,
    /// Delay after a report round trip (milliseconds)
    pub cycle_delay_ms: u32,
    /// Delay after issuing a reconnect request (milliseconds)
    pub reconnect_delay_ms: u32,
    /// Final delay of every tick (milliseconds)
    pub trailing_delay_ms: u32,
    /// HTTP round-trip timeout (milliseconds)
    pub http_timeout_ms: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Network
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
            endpoint: bounded(DEFAULT_ENDPOINT),

            // Probe
            probe_offset_c: 0.25,

            // Timing
            connect_retry_ms: 500,
            connect_settle_ms: 1000,
            conversion_poll_ms: 10,
            conversion_timeout_ms: Some(1000), // 12-bit worst case is 750 ms
            sensor_retry_delay_ms: 100,
            cycle_delay_ms: 200,
            reconnect_delay_ms: 1000,
            trailing_delay_ms: 100,
            http_timeout_ms: 5000,
        }
    }
}

impl NodeConfig {
    /// Defaults plus the network values baked in at build time.
    ///
    /// Values longer than their field capacity are truncated at a char
    /// boundary; [`validate`](Self::validate) and the WiFi adapter reject
    /// anything unusable.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(ssid) = option_env!("ROOMNODE_WIFI_SSID") {
            config.wifi_ssid = bounded(ssid);
        }
        if let Some(pass) = option_env!("ROOMNODE_WIFI_PASS") {
            config.wifi_password = bounded(pass);
        }
        if let Some(endpoint) = option_env!("ROOMNODE_ENDPOINT") {
            config.endpoint = bounded(endpoint);
        }
        config
    }

    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config("endpoint is empty"));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::Config("endpoint must start with http:// or https://"));
        }
        if self.conversion_poll_ms == 0 {
            return Err(Error::Config("conversion_poll_ms must be non-zero"));
        }
        if self
            .conversion_timeout_ms
            .is_some_and(|limit| limit < self.conversion_poll_ms)
        {
            return Err(Error::Config(
                "conversion_timeout_ms must cover at least one poll interval",
            ));
        }
        if self.http_timeout_ms == 0 {
            return Err(Error::Config("http_timeout_ms must be non-zero"));
        }
        Ok(())
    }
}

/// Copy `s` into a fixed-capacity string, dropping whatever does not fit.
fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
