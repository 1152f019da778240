//! Connectivity manager — owns the link state.
//!
//! Blocks at boot until the station first associates, then answers the
//! scheduler's per-tick `is_connected()` query and issues one non-blocking
//! reconnect per offline tick.  No link error is fatal.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::LinkPort;
use crate::config::NodeConfig;

/// Link state as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Disconnected,
    Connected,
}

pub struct ConnectivityManager<L> {
    link: L,
    state: ConnectivityState,
    started: bool,
    retry_ms: u32,
    /// Reconnect requests issued since the link was last up.
    reconnect_attempts: u32,
}

impl<L: LinkPort> ConnectivityManager<L> {
    pub fn new(link: L, config: &NodeConfig) -> Self {
        Self {
            link,
            state: ConnectivityState::Disconnected,
            started: false,
            retry_ms: config.connect_retry_ms,
            reconnect_attempts: 0,
        }
    }

    /// Start the station and wait, with no timeout, until it is up.
    ///
    /// Returns the number of polls it took.
    pub fn ensure_initial_connection(&mut self, delay: &mut impl DelayNs) -> u32 {
        let mut polls: u32 = 0;
        loop {
            if !self.started {
                match self.link.begin() {
                    Ok(()) => self.started = true,
                    Err(e) => warn!("Link: start failed ({}), retrying", e),
                }
            }
            if self.started && self.link.is_link_up() {
                break;
            }
            delay.delay_ms(self.retry_ms);
            polls = polls.saturating_add(1);
        }
        self.state = ConnectivityState::Connected;
        self.reconnect_attempts = 0;
        info!("Link: connected after {} poll(s)", polls);
        polls
    }

    /// Non-blocking state query; refreshes [`state`](Self::state).
    pub fn is_connected(&mut self) -> bool {
        let up = self.started && self.link.is_link_up();
        let next = if up {
            ConnectivityState::Connected
        } else {
            ConnectivityState::Disconnected
        };
        if next != self.state {
            match next {
                ConnectivityState::Connected => {
                    info!("Link: restored after {} reconnect(s)", self.reconnect_attempts);
                    self.reconnect_attempts = 0;
                }
                ConnectivityState::Disconnected => warn!("Link: connection lost"),
            }
            self.state = next;
        }
        up
    }

    /// Fire one reconnect request and return immediately.
    ///
    /// Returns the attempt number since the link was last up.
    pub fn reconnect(&mut self) -> u32 {
        self.reconnect_attempts = self.reconnect_attempts.saturating_add(1);
        let result = if self.started {
            self.link.request_reconnect()
        } else {
            self.link.begin().map(|()| self.started = true)
        };
        if let Err(e) = result {
            warn!("Link: reconnect attempt {} rejected ({})", self.reconnect_attempts, e);
        }
        self.reconnect_attempts
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}
