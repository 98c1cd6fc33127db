//! HTTP dispatcher: every backend call funnels through [`ApiClient::request`].
//!
//! DESIGN
//! ======
//! The dispatcher resolves a relative path against the configured base URL,
//! builds headers (JSON content type, bearer token unless opted out), and
//! normalizes the outcome: transport failures become [`ApiError::Network`],
//! non-2xx responses become [`ApiError::Http`], and bodies that are absent or
//! not JSON become `Value::Null` rather than an error. Response
//! interpretation is a pure function so the error contract is testable
//! without a live socket.
//!
//! There is no retry policy and no coordination between concurrent calls;
//! conflict resolution belongs to the backend. Dropping the returned future
//! aborts the in-flight request.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, FALLBACK_ERROR_MESSAGE};
use crate::session::SessionStore;

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Per-request dispatch options.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    /// Never attach an `Authorization` header, even when a token is stored.
    /// For endpoints that must be reachable pre-authentication.
    pub skip_auth: bool,
    /// Use this token instead of reading the session store. Some consumers
    /// hold a token in local state rather than re-reading storage per call.
    pub token_override: Option<String>,
    /// Extra headers. Dispatcher defaults never overwrite a header set here.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options for pre-auth endpoints (register, login, health).
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self { skip_auth: true, ..Self::default() }
    }

    /// Options carrying an optional token override; `None` falls back to the
    /// session store.
    #[must_use]
    pub fn with_token(token: Option<&str>) -> Self {
        Self { token_override: token.map(str::to_owned), ..Self::default() }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// The API client: an HTTP handle, a base URL, and the injected session
/// store. Cheap to clone is not a goal; consumers build one and share it.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client from explicit config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), session })
    }

    /// Build a client configured from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn from_env(session: SessionStore) -> Result<Self, ApiError> {
        Self::new(&ClientConfig::from_env(), session)
    }

    /// Backend origin this client resolves paths against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The injected session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Dispatch a request and return the parsed JSON payload.
    ///
    /// The session store is read only when no override is supplied and auth
    /// is not skipped; the dispatcher never writes to it.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] when no response is obtained, [`ApiError::Http`]
    /// for non-2xx statuses. A 2xx with an empty or non-JSON body resolves to
    /// `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        opts: &RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let stored = if opts.skip_auth || opts.token_override.is_some() {
            None
        } else {
            self.session.token()
        };
        let headers = build_headers(stored.as_deref(), opts);

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "transport failure");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        interpret_response(status, &text)
    }

    /// GET `/health`. Pre-auth; never sends a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx status.
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let value = self
            .request(Method::GET, "/health", None, &RequestOptions::unauthenticated())
            .await?;
        decode(value)
    }
}

/// Payload of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Build outbound headers from caller-supplied headers plus dispatcher
/// defaults. Content type defaults to JSON; the bearer token (override first,
/// then stored) is attached once, never duplicating a caller-set
/// `Authorization` and never attached when `skip_auth` is set or no token
/// exists anywhere.
fn build_headers(stored_token: Option<&str>, opts: &RequestOptions) -> HeaderMap {
    let mut headers = opts.headers.clone();
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    if opts.skip_auth || headers.contains_key(AUTHORIZATION) {
        return headers;
    }

    if let Some(token) = opts.token_override.as_deref().or(stored_token) {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("token is not a valid header value; sending unauthenticated");
            }
        }
    }

    headers
}

/// Interpret a response: lenient body parse, then status check.
///
/// An absent or non-JSON body is `Value::Null`, never an error. On non-2xx
/// the message prefers the body's `detail` field, then `message`, then the
/// status canonical reason, then a generic fallback.
fn interpret_response(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    let value = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(value);
    }

    let message = value
        .get("detail")
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .map(str::to_owned)
        .or_else(|| status.canonical_reason().map(str::to_owned))
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    let detail = if value.is_null() { None } else { Some(value) };
    Err(ApiError::Http { status: status.as_u16(), message, detail })
}

/// Deserialize a dispatcher payload into the wrapper's typed shape.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Serialize a typed request body for the dispatcher.
pub(crate) fn to_body<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Validation(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
