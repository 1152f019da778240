//! WiFi station-mode adapter.
//!
//! Implements [`LinkPort`] — the hexagonal boundary for network
//! connectivity.  Connect and reconnect requests are fire-and-forget; the
//! [`ConnectivityManager`](crate::connectivity::ConnectivityManager) observes
//! the outcome on later ticks through `is_link_up()`.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: in-memory simulation for host-side tests.

use log::{info, warn};

use crate::app::ports::LinkPort;
use crate::error::LinkError;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), LinkError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(LinkError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(LinkError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), LinkError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(LinkError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    started: bool,
    #[cfg(target_os = "espidf")]
    driver: esp_idf_svc::wifi::EspWifi<'static>,
    /// Simulation: whether the (pretend) AP is reachable.
    #[cfg(not(target_os = "espidf"))]
    sim_ap_reachable: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_associated: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_connect_requests: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(driver: esp_idf_svc::wifi::EspWifi<'static>) -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            started: false,
            driver,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            started: false,
            sim_ap_reachable: true,
            sim_associated: false,
            sim_connect_requests: 0,
        }
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|()| LinkError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|()| LinkError::InvalidPassword)?;
        info!("WiFi: credentials updated (SSID='{}')", self.ssid);
        Ok(())
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) -> Result<(), LinkError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|()| LinkError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|()| LinkError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        self.driver.set_configuration(&config).map_err(|e| {
            warn!("WiFi: set_configuration failed ({})", e);
            LinkError::ConnectFailed
        })?;
        self.driver.start().map_err(|e| {
            warn!("WiFi: start failed ({})", e);
            LinkError::ConnectFailed
        })?;
        self.platform_connect()
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) -> Result<(), LinkError> {
        self.platform_connect()
    }

    /// Non-blocking: `esp_wifi_connect` returns before association.
    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), LinkError> {
        self.driver.connect().map_err(|e| {
            warn!("WiFi: connect request failed ({})", e);
            LinkError::ConnectFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), LinkError> {
        self.sim_connect_requests = self.sim_connect_requests.wrapping_add(1);
        self.sim_associated = self.sim_ap_reachable;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.driver.is_connected().unwrap_or(false)
            && self.driver.sta_netif().is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.sim_associated
    }

    /// Simulation: make the AP (un)reachable.  Going unreachable drops the
    /// current association; coming back needs a reconnect request.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_ap_reachable(&mut self, reachable: bool) {
        self.sim_ap_reachable = reachable;
        if !reachable {
            self.sim_associated = false;
        }
    }

    /// Simulation: connect/reconnect requests issued so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_connect_requests(&self) -> u32 {
        self.sim_connect_requests
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// LinkPort
// ───────────────────────────────────────────────────────────────

impl LinkPort for WifiAdapter {
    fn begin(&mut self) -> Result<(), LinkError> {
        if self.ssid.is_empty() {
            return Err(LinkError::NoCredentials);
        }
        if self.started {
            return self.platform_connect();
        }
        info!("WiFi: starting station for '{}'", self.ssid);
        self.platform_start()?;
        self.started = true;
        Ok(())
    }

    fn is_link_up(&self) -> bool {
        self.started && self.platform_is_connected()
    }

    fn request_reconnect(&mut self) -> Result<(), LinkError> {
        if !self.started {
            return self.begin();
        }
        self.platform_connect()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
