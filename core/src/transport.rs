//! HTTP client adapter.
//!
//! # Design
//! `Transport` is the only place network I/O happens. `HttpAdapter` owns the
//! suite's `BaseConfig`, resolves each request's path against it, and hands
//! the absolute URL to the transport. Tests swap in their own `Transport` to
//! record URLs or simulate failures without a server.

use std::fmt;
use std::io;
use std::time::Duration;

use log::debug;

use crate::config::BaseConfig;
use crate::error::{TransportError, TransportErrorKind};
use crate::http::{HttpMethod, HttpRequest, ResponseEnvelope};

/// Timeout applied to a whole request when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes a single request against an absolute URL.
pub trait Transport {
    fn execute(&self, url: &str, request: &HttpRequest) -> Result<ResponseEnvelope, TransportError>;
}

/// Blocking transport backed by `ureq`.
///
/// 4xx/5xx responses are returned as envelopes; only failures to obtain a
/// response at all become `TransportError`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, url: &str, request: &HttpRequest) -> Result<ResponseEnvelope, TransportError> {
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = self.agent.post(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| transport_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // A status line and headers arrived, so any body size is a response.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| transport_error(url, e))?;

        Ok(ResponseEnvelope {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(url: &str, error: ureq::Error) -> TransportError {
    let kind = match &error {
        ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
        ureq::Error::HostNotFound => TransportErrorKind::Dns,
        ureq::Error::Io(e) if is_lookup_failure(e) => TransportErrorKind::Dns,
        ureq::Error::Io(_) | ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
        _ => TransportErrorKind::Other,
    };
    TransportError {
        url: url.to_string(),
        kind,
        message: error.to_string(),
    }
}

/// Name resolution failures reach ureq as plain I/O errors from the
/// system resolver; only the message tells them apart.
fn is_lookup_failure(error: &io::Error) -> bool {
    let message = error.to_string().to_ascii_lowercase();
    ["failed to lookup address", "name or service not known", "no such host", "nodename nor servname"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Sends probe requests relative to a fixed base URL.
#[derive(Debug, Clone)]
pub struct HttpAdapter<T = UreqTransport> {
    config: BaseConfig,
    transport: T,
}

impl HttpAdapter<UreqTransport> {
    pub fn new(config: BaseConfig, timeout: Duration) -> Self {
        Self::with_transport(config, UreqTransport::new(timeout))
    }
}

impl<T: Transport> HttpAdapter<T> {
    pub fn with_transport(config: BaseConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &BaseConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve the request path against the base URL and execute it.
    pub fn send(&self, request: &HttpRequest) -> Result<ResponseEnvelope, TransportError> {
        let url = self.config.join(&request.path);
        debug!("{} {}", request.method, url);
        let response = self.transport.execute(&url, request)?;
        debug!(
            "{} {} -> {} ({}, {} bytes)",
            request.method,
            url,
            response.status,
            response.content_type().unwrap_or("no content type"),
            response.body.len()
        );
        Ok(response)
    }
}
