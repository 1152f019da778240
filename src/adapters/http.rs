//! HTTP client adapter.
//!
//! Implements [`HttpConnector`] on top of the ESP-IDF HTTP client
//! (`esp_idf_svc::http::client::EspHttpConnection` wrapped in the
//! `embedded_svc` client).  Each `connect()` creates a fresh connection with
//! the configured timeout; dropping it closes the socket.
//!
//! Response bodies are collected into a bounded buffer.  The service only
//! ever answers with a two-field JSON object, so anything larger than
//! [`MAX_RESPONSE_BYTES`] is refused.

use crate::app::ports::TransportError;

/// Largest response body accepted.
pub const MAX_RESPONSE_BYTES: usize = 512;

/// Drain a reader into a `Vec`, failing once `limit` would be exceeded.
///
/// `read` follows the usual contract: fill the buffer, return 0 at EOF.
pub fn collect_body<E>(
    mut read: impl FnMut(&mut [u8]) -> Result<usize, E>,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    let mut chunk = [0u8; 128];
    loop {
        let n = read(&mut chunk).map_err(|_| TransportError::Io)?;
        if n == 0 {
            return Ok(body);
        }
        if body.len() + n > limit {
            return Err(TransportError::BodyTooLarge);
        }
        body.extend_from_slice(&chunk[..n]);
    }
}

#[cfg(target_os = "espidf")]
mod platform {
    use core::time::Duration;

    use embedded_svc::http::client::Client;
    use embedded_svc::io::{Read, Write};
    use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
    use log::warn;

    use super::{MAX_RESPONSE_BYTES, collect_body};
    use crate::app::ports::{HttpConnection, HttpConnector, HttpResponse, TransportError};

    pub struct EspHttpConnector {
        timeout: Duration,
    }

    impl EspHttpConnector {
        pub fn new(timeout: Duration) -> Self {
            Self { timeout }
        }
    }

    impl HttpConnector for EspHttpConnector {
        type Connection = EspHttpSession;

        fn connect(&mut self) -> Result<EspHttpSession, TransportError> {
            let config = Configuration {
                timeout: Some(self.timeout),
                ..Default::default()
            };
            let conn = EspHttpConnection::new(&config).map_err(|e| {
                warn!("HTTP: connection setup failed ({})", e);
                TransportError::Connect
            })?;
            Ok(EspHttpSession {
                client: Client::wrap(conn),
            })
        }
    }

    /// One open connection; closed on drop.
    pub struct EspHttpSession {
        client: Client<EspHttpConnection>,
    }

    impl HttpConnection for EspHttpSession {
        fn post(
            &mut self,
            url: &str,
            headers: &[(&str, &str)],
            body: &[u8],
        ) -> Result<HttpResponse, TransportError> {
            let content_length = body.len().to_string();
            let mut all_headers: Vec<(&str, &str)> = headers.to_vec();
            all_headers.push(("Content-Length", content_length.as_str()));

            let mut request = self.client.post(url, &all_headers).map_err(|e| {
                warn!("HTTP: request to {} failed ({:?})", url, e);
                TransportError::Connect
            })?;
            request.write_all(body).map_err(|_| TransportError::Io)?;
            request.flush().map_err(|_| TransportError::Io)?;

            let mut response = request.submit().map_err(|e| {
                warn!("HTTP: submit failed ({:?})", e);
                TransportError::Io
            })?;
            let status = response.status();
            let body = collect_body(|buf| response.read(buf), MAX_RESPONSE_BYTES)?;
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(target_os = "espidf")]
pub use platform::{EspHttpConnector, EspHttpSession};
