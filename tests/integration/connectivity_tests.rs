//! Integration tests for the connectivity manager over the simulated
//! WiFi station.

use crate::mock_hw::RecordingDelay;

use roomnode::adapters::wifi::WifiAdapter;
use roomnode::config::NodeConfig;
use roomnode::connectivity::{ConnectivityManager, ConnectivityState};

fn manager(reachable: bool) -> ConnectivityManager<WifiAdapter> {
    let mut wifi = WifiAdapter::new();
    wifi.set_credentials("HomeWiFi", "mysecret8").unwrap();
    wifi.sim_set_ap_reachable(reachable);
    ConnectivityManager::new(wifi, &NodeConfig::default())
}

#[test]
fn initial_connection_returns_once_associated() {
    let mut link = manager(true);
    let mut delay = RecordingDelay::default();

    assert_eq!(link.ensure_initial_connection(&mut delay), 0);
    assert!(delay.waits_ms.is_empty());
    assert_eq!(link.state(), ConnectivityState::Connected);
    assert!(link.is_connected());
}

#[test]
fn lost_link_is_observed_and_reconnect_counts_attempts() {
    let mut link = manager(true);
    link.ensure_initial_connection(&mut RecordingDelay::default());

    link.link_mut().sim_set_ap_reachable(false);
    assert!(!link.is_connected());
    assert_eq!(link.state(), ConnectivityState::Disconnected);
    assert_eq!(link.reconnect(), 1);
    assert_eq!(link.reconnect(), 2);
    assert!(!link.is_connected());

    link.link_mut().sim_set_ap_reachable(true);
    assert_eq!(link.reconnect(), 3);
    assert!(link.is_connected());
    assert_eq!(link.state(), ConnectivityState::Connected);

    // Counter restarts after a restore.
    link.link_mut().sim_set_ap_reachable(false);
    assert!(!link.is_connected());
    assert_eq!(link.reconnect(), 1);
}

#[test]
fn reconnect_requests_reach_the_driver() {
    let mut link = manager(true);
    link.ensure_initial_connection(&mut RecordingDelay::default());
    let before = link.link().sim_connect_requests();

    link.link_mut().sim_set_ap_reachable(false);
    link.is_connected();
    link.reconnect();
    link.reconnect();

    assert_eq!(link.link().sim_connect_requests(), before + 2);
}

#[test]
fn missing_credentials_never_report_connected() {
    let mut link = ConnectivityManager::new(WifiAdapter::new(), &NodeConfig::default());

    assert!(!link.is_connected());
    assert_eq!(link.reconnect(), 1);
    assert!(!link.is_connected());
}
