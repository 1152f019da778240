//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                    |
//! |------------|--------------------|--------------------------------|
//! | `hardware` | ActuatorPort       | Fan + light GPIO outputs       |
//! | `http`     | HttpConnector      | ESP-IDF HTTP client            |
//! |            | HttpConnection     |                                |
//! | `log_sink` | EventSink          | Serial log output              |
//! | `wifi`     | LinkPort           | ESP-IDF WiFi STA               |
//!
//! The probe and PIR adapters live under [`crate::sensors`].

pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod wifi;
