//! Suite bootstrap: resolving the base URL every probe is sent against.
//!
//! The override chain is explicit value, then `API_BASE_URL`, then
//! `DEFAULT_BASE_URL`. Empty and whitespace-only values count as absent.

use log::info;
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides the base URL.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Base URL used when no override is present.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Resolved, immutable target of a suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseConfig {
    base_url: String,
}

impl BaseConfig {
    /// Resolve an optional override into a validated configuration.
    pub fn resolve(value: Option<String>) -> Result<Self, ConfigError> {
        let raw = value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        Self::parse(raw)
    }

    /// Resolve from `API_BASE_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(std::env::var(API_BASE_URL_ENV).ok())
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::UnsupportedScheme {
                    url: raw.to_string(),
                    scheme: other.to_string(),
                })
            }
        }
        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL with a single `/` separator.
    ///
    /// Absolute `http://` or `https://` paths are returned unchanged.
    pub fn join(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{}", self.base_url, path)
    }
}

fn is_absolute(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// One-time suite initialization.
///
/// An explicit override (e.g. a command-line flag) wins over the
/// environment. Calling this repeatedly in the same environment yields the
/// same configuration.
pub fn bootstrap(explicit: Option<String>) -> Result<BaseConfig, ConfigError> {
    let config = match explicit.filter(|v| !v.trim().is_empty()) {
        Some(value) => BaseConfig::resolve(Some(value))?,
        None => BaseConfig::from_env()?,
    };
    info!("setup completed, base url: {}", config.base_url());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_override_uses_default() {
        let config = BaseConfig::resolve(None).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn empty_override_uses_default() {
        assert_eq!(
            BaseConfig::resolve(Some(String::new())).unwrap().base_url(),
            DEFAULT_BASE_URL
        );
        assert_eq!(
            BaseConfig::resolve(Some("   ".to_string())).unwrap().base_url(),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn override_is_trimmed_and_trailing_slash_dropped() {
        let config = BaseConfig::resolve(Some(" https://example.test/v1/ ".to_string())).unwrap();
        assert_eq!(config.base_url(), "https://example.test/v1");
    }

    #[test]
    fn resolution_is_idempotent() {
        let value = Some("https://example.test/v1".to_string());
        assert_eq!(
            BaseConfig::resolve(value.clone()).unwrap(),
            BaseConfig::resolve(value).unwrap()
        );
    }

    #[test]
    fn garbage_override_is_rejected() {
        let err = BaseConfig::resolve(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = BaseConfig::resolve(Some("ftp://example.test".to_string())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedScheme {
                url: "ftp://example.test".to_string(),
                scheme: "ftp".to_string(),
            }
        );
    }

    #[test]
    fn join_uses_single_separator() {
        let config = BaseConfig::resolve(Some("http://localhost:8080/api/".to_string())).unwrap();
        assert_eq!(config.join("/users"), "http://localhost:8080/api/users");
        assert_eq!(config.join("users"), "http://localhost:8080/api/users");
        assert_eq!(config.join("/auth/login"), "http://localhost:8080/api/auth/login");
    }

    #[test]
    fn join_does_not_normalize_beyond_separator() {
        let config = BaseConfig::resolve(None).unwrap();
        assert_eq!(config.join("/a/../b"), "http://localhost:8080/api/a/../b");
    }

    #[test]
    fn join_passes_absolute_urls_through() {
        let config = BaseConfig::resolve(None).unwrap();
        assert_eq!(
            config.join("https://other.test/health"),
            "https://other.test/health"
        );
        assert_eq!(config.join("HTTP://other.test"), "HTTP://other.test");
    }

    // The only test in this crate that touches API_BASE_URL; the set and
    // unset cases stay in one function so they never race each other.
    #[test]
    fn api_base_url_env_drives_bootstrap() {
        std::env::set_var(API_BASE_URL_ENV, "https://example.test/v1");
        let exported = bootstrap(None).unwrap();
        assert_eq!(exported, BaseConfig::from_env().unwrap());
        assert_eq!(exported.join("/auth/login"), "https://example.test/v1/auth/login");
        assert_eq!(exported.join("/users"), "https://example.test/v1/users");
        assert_eq!(bootstrap(None).unwrap(), exported);

        let explicit = bootstrap(Some("https://explicit.test".to_string())).unwrap();
        assert_eq!(explicit.base_url(), "https://explicit.test");
        assert_eq!(bootstrap(Some("  ".to_string())).unwrap(), exported);

        std::env::set_var(API_BASE_URL_ENV, "");
        assert_eq!(bootstrap(None).unwrap().base_url(), DEFAULT_BASE_URL);

        std::env::remove_var(API_BASE_URL_ENV);
        let unset = bootstrap(None).unwrap();
        assert_eq!(unset.base_url(), DEFAULT_BASE_URL);
        assert_eq!(unset.join("/users"), "http://localhost:8080/api/users");
        assert_eq!(BaseConfig::from_env().unwrap(), unset);
    }

    #[test]
    fn bootstrap_prefers_explicit_value() {
        let config = bootstrap(Some("https://explicit.test".to_string())).unwrap();
        assert_eq!(config.base_url(), "https://explicit.test");
    }
}
