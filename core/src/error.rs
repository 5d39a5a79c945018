//! Error types for the probe harness.
//!
//! # Design
//! A probe fails for one of two reasons: no response came back
//! (`TransportError`) or a response came back and broke a predicate
//! (`AssertionError`). Both end the probe, never the suite. Configuration
//! problems surface before any probe runs.

use thiserror::Error;

/// Broad category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Dns,
    Connect,
    Other,
}

/// The adapter could not obtain a response.
#[derive(Debug, Clone, Error)]
#[error("transport error for {url}: {message}")]
pub struct TransportError {
    pub url: String,
    pub kind: TransportErrorKind,
    pub message: String,
}

/// A response was received but violated an assertion.
///
/// `message` is the literal text reported for the failed check; `expected`
/// and `actual` describe the comparison that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (expected {expected}, actual {actual})")]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

/// Reason a single probe failed.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Assertion(#[from] AssertionError),
}

/// The base URL could not be turned into a usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("base url {url:?} must use http or https, got {scheme}")]
    UnsupportedScheme { url: String, scheme: String },
}

/// Suite selection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiteError {
    #[error("unknown probe: {0}")]
    UnknownProbe(String),
}
