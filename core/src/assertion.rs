//! Predicates evaluated against a response envelope.
//!
//! None of these look inside the body: probes check that the API answers,
//! not what it answers with.

use crate::error::AssertionError;
use crate::http::ResponseEnvelope;

/// A single check applied to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assertion {
    /// A response was obtained at all.
    Responded,
    /// `min <= status < max`.
    StatusInRange { min: u16, max: u16 },
    /// The status line carried a real HTTP status code.
    StatusPresent,
    /// The body field exists; it may be empty.
    BodyPresent,
    /// `Content-Type` is present and non-empty.
    ContentTypePresent,
}

impl Assertion {
    /// Status codes a server can legitimately return, inclusive.
    const STATUS_BOUNDS: (u16, u16) = (100, 599);

    /// Short human-readable form, used in listings.
    pub fn description(&self) -> String {
        match self {
            Assertion::Responded => "response received".to_string(),
            Assertion::StatusInRange { min, max } => format!("status in [{min}, {max})"),
            Assertion::StatusPresent => "status code present".to_string(),
            Assertion::BodyPresent => "body present".to_string(),
            Assertion::ContentTypePresent => "content-type present".to_string(),
        }
    }

    pub fn check(&self, response: &ResponseEnvelope) -> Result<(), AssertionError> {
        match *self {
            // Holding an envelope is the evidence.
            Assertion::Responded => Ok(()),
            Assertion::StatusInRange { min, max } => {
                if (min..max).contains(&response.status) {
                    Ok(())
                } else {
                    Err(AssertionError {
                        message: format!("Expected valid status code but got {}", response.status),
                        expected: format!("status in [{min}, {max})"),
                        actual: response.status.to_string(),
                    })
                }
            }
            Assertion::StatusPresent => {
                let (low, high) = Self::STATUS_BOUNDS;
                if (low..=high).contains(&response.status) {
                    Ok(())
                } else {
                    Err(AssertionError {
                        message: "Status code should not be null".to_string(),
                        expected: format!("status in [{low}, {high}]"),
                        actual: response.status.to_string(),
                    })
                }
            }
            Assertion::BodyPresent => Ok(()),
            Assertion::ContentTypePresent => match response.content_type().map(str::trim) {
                Some(value) if !value.is_empty() => Ok(()),
                Some(_) => Err(AssertionError {
                    message: "Content-Type header should be present".to_string(),
                    expected: "non-empty Content-Type".to_string(),
                    actual: "empty Content-Type".to_string(),
                }),
                None => Err(AssertionError {
                    message: "Content-Type header should be present".to_string(),
                    expected: "non-empty Content-Type".to_string(),
                    actual: "no Content-Type header".to_string(),
                }),
            },
        }
    }
}

/// Check `assertions` in order, stopping at the first failure.
pub fn check_all(assertions: &[Assertion], response: &ResponseEnvelope) -> Result<(), AssertionError> {
    assertions.iter().try_for_each(|a| a.check(response))
}
