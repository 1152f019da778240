//! RoomNode Firmware — Main Entry Point
//!
//! Sense → report → actuate over a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Ds18b20Probe   PirSensor      WifiAdapter    EspHttpConnector │
//! │  (Temperature)  (Presence)     (LinkPort)     (HttpConnector)  │
//! │  HardwareAdapter               LogEventSink                    │
//! │  (ActuatorPort)                (EventSink)                     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  SensorAcquisition · ConnectivityManager ·             │    │
//! │  │  TelemetryReporter · ActuationController               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  ControlLoop (one tick per pass, never returns)                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::time::Duration;

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::info;

use roomnode::actuation::ActuationController;
use roomnode::adapters::hardware::HardwareAdapter;
use roomnode::adapters::http::EspHttpConnector;
use roomnode::adapters::log_sink::LogEventSink;
use roomnode::adapters::wifi::WifiAdapter;
use roomnode::app::device::Device;
use roomnode::app::events::AppEvent;
use roomnode::app::ports::EventSink;
use roomnode::config::NodeConfig;
use roomnode::connectivity::ConnectivityManager;
use roomnode::drivers::status_led::StatusLed;
use roomnode::error::Error;
use roomnode::pins;
use roomnode::scheduler::ControlLoop;
use roomnode::sensors::SensorAcquisition;
use roomnode::sensors::presence::PirSensor;
use roomnode::sensors::temperature::Ds18b20Probe;
use roomnode::telemetry::TelemetryReporter;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RoomNode v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = NodeConfig::from_build_env();
    config.validate()?;

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let mut delay = FreeRtos;

    // ── 2. Outputs off, power-on indication ───────────────────
    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    let (fan_pin, light_pin, led_pin, pir_pin, probe_pin) = unsafe {
        (
            AnyOutputPin::new(pins::FAN_GPIO),
            AnyOutputPin::new(pins::LIGHT_GPIO),
            AnyOutputPin::new(pins::STATUS_LED_GPIO),
            AnyInputPin::new(pins::PIR_GPIO),
            AnyIOPin::new(pins::PROBE_ONE_WIRE_GPIO),
        )
    };

    let mut hw = HardwareAdapter::new(PinDriver::output(fan_pin)?, PinDriver::output(light_pin)?);
    let mut led = StatusLed::new(PinDriver::output(led_pin)?);
    led.boot_indication(&mut delay);

    // ── 3. Sensors ────────────────────────────────────────────
    let probe = Ds18b20Probe::new(probe_pin, config.probe_offset_c)?;
    let pir = PirSensor::new(PinDriver::input(pir_pin)?);
    let sensors = SensorAcquisition::new(probe, pir, &config);

    // ── 4. WiFi station + output self-test ────────────────────
    let mut wifi = WifiAdapter::new(EspWifi::new(peripherals.modem, sysloop, Some(nvs))?);
    wifi.set_credentials(&config.wifi_ssid, &config.wifi_password)
        .map_err(Error::from)?;
    let mut link = ConnectivityManager::new(wifi, &config);
    hw.self_test(&mut delay);

    let reporter = TelemetryReporter::new(
        EspHttpConnector::new(Duration::from_millis(u64::from(config.http_timeout_ms))),
        &config.endpoint,
    );

    // ── 5. Initial connection (blocks, no timeout) ────────────
    let mut sink = LogEventSink::new();
    link.ensure_initial_connection(&mut delay);
    sink.emit(&AppEvent::LinkUp);
    delay.delay_ms(config.connect_settle_ms);

    // ── 6. Control loop ───────────────────────────────────────
    let mut device = Device::new(sensors, link, reporter, ActuationController::new(hw));
    info!("Reporting to {}", device.reporter.url());
    ControlLoop::new(&config).run(&mut device, &mut delay, &mut sink)
}
