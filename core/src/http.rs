//! HTTP request and response values exchanged with the transport.
//!
//! # Design
//! Requests and responses are plain owned data. Probes build an
//! `HttpRequest`, the adapter turns it into a network round-trip, and the
//! result comes back as a `ResponseEnvelope` that assertions inspect. Nothing
//! here touches the network.

use std::fmt;

/// HTTP method for a request. Probes only ever issue reads and logins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `path` is either relative to the suite's base URL (`/auth/login`) or an
/// absolute `http(s)://` URL. The adapter resolves it at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Status, headers, and raw body bytes returned for a request.
///
/// An envelope always carries a status code; the body may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    /// Case-insensitive header lookup returning the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Lossy UTF-8 view of the body, cut to at most `limit` characters.
    pub fn body_preview(&self, limit: usize) -> String {
        let text = String::from_utf8_lossy(&self.body);
        if text.chars().count() <= limit {
            return text.into_owned();
        }
        let mut preview: String = text.chars().take(limit).collect();
        preview.push_str("...");
        preview
    }
}
