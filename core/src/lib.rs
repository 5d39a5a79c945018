//! Probe harness for the authentication and user endpoints of an HTTP/JSON API.
//!
//! # Overview
//! Each probe is a named request plus a list of assertions on the response.
//! The suite resolves a base URL once, sends every probe through an
//! `HttpAdapter`, and collects one outcome per probe.
//!
//! # Design
//! - `BaseConfig` is an explicit value held by the adapter; there is no
//!   process-wide client state.
//! - Network I/O sits behind the `Transport` trait; `UreqTransport` is the
//!   blocking implementation, tests substitute their own.
//! - Probes are plain records in `catalog`, so listing, filtering, and
//!   running them needs no test-framework machinery.
//! - Failures end a probe, never the suite.

pub mod assertion;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod suite;
pub mod transport;

pub use assertion::Assertion;
pub use config::{bootstrap, BaseConfig, API_BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{AssertionError, ConfigError, ProbeError, SuiteError, TransportError, TransportErrorKind};
pub use http::{HttpMethod, HttpRequest, ResponseEnvelope};
pub use probe::{OutcomeSummary, Probe, ProbeOutcome, Target};
pub use suite::{Suite, SuiteReport};
pub use transport::{HttpAdapter, Transport, UreqTransport, DEFAULT_TIMEOUT};
