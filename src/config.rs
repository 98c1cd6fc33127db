//! Client configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "https://ake-be.onrender.com";

pub const BASE_URL_VAR: &str = "AUSVISA_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "AUSVISA_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "AUSVISA_CONNECT_TIMEOUT_SECS";

/// Connection settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash. Request paths are appended
    /// verbatim.
    pub base_url: String,
    /// Whole-request timeout. `None` enforces no client-side deadline; hang
    /// behavior is then whatever the network stack does.
    pub request_timeout_secs: Option<u64>,
    /// Connect-phase timeout, same `None` semantics.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Config pointing at the given origin, with default timeouts.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), ..Self::default() }
    }

    /// Build config from environment variables.
    ///
    /// - `AUSVISA_BASE_URL`: backend origin (defaults to the hosted backend)
    /// - `AUSVISA_REQUEST_TIMEOUT_SECS`: optional whole-request timeout
    /// - `AUSVISA_CONNECT_TIMEOUT_SECS`: optional connect timeout
    ///
    /// Unparseable timeout values are treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_VAR)
            .map_or_else(|_| DEFAULT_BASE_URL.to_string(), |v| normalize_base_url(&v));
        Self {
            base_url,
            request_timeout_secs: env_parse_u64(REQUEST_TIMEOUT_VAR),
            connect_timeout_secs: env_parse_u64(CONNECT_TIMEOUT_VAR),
        }
    }

    /// Replace the base URL, normalizing it. Used by consumers that take the
    /// origin from their own flag parsing but keep env-driven timeouts.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

fn env_parse_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse::<u64>().ok())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
