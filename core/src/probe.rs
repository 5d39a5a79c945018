//! A probe is one named request plus the assertions run on its response.

use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::assertion::{check_all, Assertion};
use crate::config::BaseConfig;
use crate::error::ProbeError;
use crate::http::{HttpMethod, HttpRequest, ResponseEnvelope};
use crate::transport::{HttpAdapter, Transport};

/// Characters of the response body included in failure logs.
const BODY_PREVIEW_CHARS: usize = 512;

/// Where a probe's request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Path resolved by the adapter against the base URL.
    Relative(&'static str),
    /// Path appended to the base URL when the request is built, so the
    /// adapter receives an absolute URL.
    BaseAnchored(&'static str),
}

/// Declarative request/assertion pair identified by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub name: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    pub target: Target,
    pub body: Option<Value>,
    pub assertions: Vec<Assertion>,
}

impl Probe {
    pub fn get(name: &'static str, description: &'static str, target: Target) -> Self {
        Self {
            name,
            description,
            method: HttpMethod::Get,
            target,
            body: None,
            assertions: Vec::new(),
        }
    }

    pub fn post_json(name: &'static str, description: &'static str, target: Target, body: Value) -> Self {
        Self {
            name,
            description,
            method: HttpMethod::Post,
            target,
            body: Some(body),
            assertions: Vec::new(),
        }
    }

    /// Append an assertion; assertions run in the order they were added.
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn request(&self, config: &BaseConfig) -> HttpRequest {
        let path = match self.target {
            Target::Relative(path) => path.to_string(),
            Target::BaseAnchored(path) => format!("{}{}", config.base_url(), path),
        };
        let (headers, body) = match &self.body {
            Some(body) => (
                vec![("content-type".to_string(), "application/json".to_string())],
                Some(body.to_string()),
            ),
            None => (Vec::new(), None),
        };
        HttpRequest {
            method: self.method,
            path,
            headers,
            body,
        }
    }

    /// Send the request and evaluate every assertion against the response.
    pub fn run<T: Transport>(&self, adapter: &HttpAdapter<T>) -> ProbeOutcome {
        let start = Instant::now();
        let result = self.execute(adapter);
        ProbeOutcome {
            name: self.name,
            description: self.description,
            duration: start.elapsed(),
            result,
        }
    }

    fn execute<T: Transport>(&self, adapter: &HttpAdapter<T>) -> Result<u16, ProbeError> {
        let request = self.request(adapter.config());
        let response = adapter.send(&request)?;
        if let Err(err) = check_all(&self.assertions, &response) {
            log_failed_exchange(self.name, adapter.config(), &request, &response);
            return Err(err.into());
        }
        debug!("{}: {} assertion(s) passed", self.name, self.assertions.len());
        Ok(response.status)
    }
}

fn log_failed_exchange(name: &str, config: &BaseConfig, request: &HttpRequest, response: &ResponseEnvelope) {
    warn!(
        "{name}: request {} {} body={}",
        request.method,
        config.join(&request.path),
        request.body.as_deref().unwrap_or("<none>")
    );
    warn!(
        "{name}: response {} headers={:?} body={}",
        response.status,
        response.headers,
        response.body_preview(BODY_PREVIEW_CHARS)
    );
}

/// Result of running one probe.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub name: &'static str,
    pub description: &'static str,
    pub duration: Duration,
    /// The response status on success.
    pub result: Result<u16, ProbeError>,
}

impl ProbeOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    pub fn failure(&self) -> Option<&ProbeError> {
        self.result.as_ref().err()
    }

    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            name: self.name.to_string(),
            passed: self.passed(),
            status: self.result.as_ref().ok().copied(),
            message: self.failure().map(ToString::to_string),
            duration_ms: self.duration.as_millis() as u64,
        }
    }
}

/// Serializable view of a `ProbeOutcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeSummary {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::{TransportError, TransportErrorKind};

    struct Fixed(ResponseEnvelope);

    impl Transport for Fixed {
        fn execute(&self, _url: &str, _request: &HttpRequest) -> Result<ResponseEnvelope, TransportError> {
            Ok(self.0.clone())
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, url: &str, _request: &HttpRequest) -> Result<ResponseEnvelope, TransportError> {
            Err(TransportError {
                url: url.to_string(),
                kind: TransportErrorKind::Connect,
                message: "Connection refused (os error 111)".to_string(),
            })
        }
    }

    fn config() -> BaseConfig {
        BaseConfig::resolve(Some("http://api.test/v1".to_string())).unwrap()
    }

    fn fixed(status: u16) -> HttpAdapter<Fixed> {
        HttpAdapter::with_transport(
            config(),
            Fixed(ResponseEnvelope {
                status,
                headers: Vec::new(),
                body: b"{}".to_vec(),
            }),
        )
    }

    #[test]
    fn json_probe_sets_content_type_and_body() {
        let probe = Probe::post_json("login", "", Target::Relative("/auth/login"), json!({"email": "a@b.c"}));
        let req = probe.request(&config());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/auth/login");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "a@b.c");
    }

    #[test]
    fn get_probe_has_no_body_or_headers() {
        let req = Probe::get("users", "", Target::Relative("/users")).request(&config());
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn base_anchored_target_becomes_absolute() {
        let req = Probe::get("health", "", Target::BaseAnchored("/health")).request(&config());
        assert_eq!(req.path, "http://api.test/v1/health");
    }

    #[test]
    fn passing_probe_reports_status() {
        let probe = Probe::get("users", "", Target::Relative("/users"))
            .expect(Assertion::StatusInRange { min: 200, max: 500 });
        let outcome = probe.run(&fixed(404));
        assert!(outcome.passed());
        assert_eq!(outcome.result.unwrap(), 404);
    }

    #[test]
    fn failing_assertion_is_reported() {
        let probe = Probe::get("users", "", Target::Relative("/users"))
            .expect(Assertion::StatusInRange { min: 200, max: 500 });
        let outcome = probe.run(&fixed(500));
        match outcome.failure() {
            Some(ProbeError::Assertion(err)) => {
                assert_eq!(err.message, "Expected valid status code but got 500")
            }
            other => panic!("expected assertion failure, got {other:?}"),
        }
    }

    #[test]
    fn transport_failure_fails_probe_with_message() {
        let adapter = HttpAdapter::with_transport(config(), Unreachable);
        let outcome = Probe::get("users", "", Target::Relative("/users"))
            .expect(Assertion::Responded)
            .run(&adapter);
        let err = outcome.failure().unwrap();
        assert!(matches!(err, ProbeError::Transport(_)));
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn summary_carries_message_only_on_failure() {
        let probe = Probe::get("users", "", Target::Relative("/users"))
            .expect(Assertion::StatusInRange { min: 200, max: 500 });

        let ok = probe.run(&fixed(200)).summary();
        assert!(ok.passed);
        assert_eq!(ok.status, Some(200));
        assert!(ok.message.is_none());

        let failed = probe.run(&fixed(500)).summary();
        assert!(!failed.passed);
        assert!(failed.status.is_none());
        assert!(failed.message.unwrap().contains("got 500"));
    }
}
