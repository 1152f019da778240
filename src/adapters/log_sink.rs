//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, `log` on host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since construction.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            AppEvent::LinkUp => info!("LINK | up"),
            AppEvent::LinkDown => warn!("LINK | down"),
            AppEvent::ReconnectIssued { attempt } => {
                info!("LINK | reconnect issued, attempt={}", attempt);
            }
            AppEvent::Reading(r) => {
                info!(
                    "READ | T={:.2}\u{00b0}C | presence={}",
                    r.temperature_c,
                    u8::from(r.presence)
                );
            }
            AppEvent::CommandApplied(c) => {
                info!("CMD | fan={:?} light={:?}", c.fan, c.light);
            }
            AppEvent::Fault(e) => warn!("FAULT | {}", e),
        }
    }
}
