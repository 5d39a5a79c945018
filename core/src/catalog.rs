//! The probes exercised against the authentication and user endpoints.

use serde_json::json;

use crate::assertion::Assertion;
use crate::probe::{Probe, Target};

const AUTH: &str = "/auth";
const LOGIN: &str = "/auth/login";
const USERS: &str = "/users";
const HEALTH: &str = "/health";

pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "password123";

/// Any status a reachable server may answer with short of a server error.
const VALID_STATUS: Assertion = Assertion::StatusInRange { min: 200, max: 500 };

/// Every declared probe, in discovery order.
pub fn probes() -> Vec<Probe> {
    let credentials = json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD });

    vec![
        Probe::post_json(
            "login-endpoint-returns-response",
            "Login endpoint returns response",
            Target::Relative(LOGIN),
            credentials.clone(),
        )
        .expect(Assertion::Responded)
        .expect(VALID_STATUS),
        Probe::get(
            "auth-endpoint-accessible",
            "Auth endpoint is accessible",
            Target::Relative(AUTH),
        )
        .expect(Assertion::Responded),
        Probe::post_json(
            "login-missing-credentials",
            "Login with missing credentials returns error",
            Target::Relative(LOGIN),
            json!({}),
        )
        .expect(Assertion::StatusPresent),
        Probe::post_json(
            "auth-response-structure",
            "Verify authentication response structure",
            Target::Relative(LOGIN),
            credentials,
        )
        .expect(Assertion::BodyPresent),
        Probe::get(
            "health-check",
            "Health check API is available",
            Target::BaseAnchored(HEALTH),
        )
        .expect(Assertion::Responded),
        Probe::get(
            "get-users",
            "GET users endpoint returns valid response",
            Target::Relative(USERS),
        )
        .expect(Assertion::Responded)
        .expect(VALID_STATUS),
        Probe::get(
            "user-object-structure",
            "User object structure validation",
            Target::Relative(USERS),
        )
        .expect(Assertion::BodyPresent),
        Probe::get(
            "response-content-type",
            "Verify response content type is JSON",
            Target::Relative(USERS),
        )
        .expect(Assertion::ContentTypePresent),
    ]
}
