//! User and authentication endpoints.
//!
//! Wrappers carry no logic beyond path, method, and auth mode. The one
//! boundary normalization is the activation flag: the backend reports it
//! under both `is_activate` and `is_active` inconsistently, and [`User`]
//! coalesces the pair into a single field on deserialization so no consumer
//! re-derives it.

use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{ApiClient, RequestOptions, decode, to_body};
use crate::error::ApiError;

// =============================================================================
// TYPES
// =============================================================================

/// A user account as exposed by the backend. Replaced wholesale after each
/// server round trip; never mutated field-by-field on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// `"admin"` or an ordinary role; treated as opaque beyond that check.
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Normalized activation flag. `Some(false)` means suspended; absent
    /// means the backend did not report either spelling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
struct UserWire {
    id: i64,
    email: String,
    username: String,
    #[serde(default)]
    full_name: Option<String>,
    role: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default)]
    is_activate: Option<bool>,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = UserWire::deserialize(deserializer)?;
        Ok(Self {
            id: wire.id,
            email: wire.email,
            username: wire.username,
            full_name: wire.full_name,
            role: wire.role,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            // `is_activate` wins when both spellings are present.
            is_active: wire.is_activate.or(wire.is_active),
        })
    }
}

impl User {
    /// Suspended accounts report an explicit `false`; absent means active.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.is_active == Some(false)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Successful login exchange: the bearer token plus the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Partial update body for the PUT endpoints; absent fields are untouched
/// server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// =============================================================================
// PATHS
// =============================================================================

fn list_users_path(skip: u32, limit: u32) -> String {
    format!("/api/users?skip={skip}&limit={limit}")
}

fn user_path(id: i64) -> String {
    format!("/api/users/{id}")
}

fn user_action_path(id: i64, action: &str) -> String {
    format!("/api/users/{id}/{action}")
}

// =============================================================================
// ENDPOINTS
// =============================================================================

impl ApiClient {
    /// POST `/api/users/register`. Pre-auth; never sends a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected payload shape.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError> {
        let body = to_body(payload)?;
        let value = self
            .request(
                Method::POST,
                "/api/users/register",
                Some(&body),
                &RequestOptions::unauthenticated(),
            )
            .await?;
        decode(value)
    }

    /// POST `/api/users/login`. Pre-auth; never sends a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a 401 here means bad credentials, not an
    /// expired session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let value = self
            .request(
                Method::POST,
                "/api/users/login",
                Some(&body),
                &RequestOptions::unauthenticated(),
            )
            .await?;
        decode(value)
    }

    /// GET `/api/users/me` with the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; 401 signals an expired or missing session.
    pub async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let value = self
            .request(Method::GET, "/api/users/me", None, &RequestOptions::default())
            .await?;
        decode(value)
    }

    /// PUT `/api/users/me` with the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn update_current_user(&self, payload: &UserUpdate) -> Result<User, ApiError> {
        let body = to_body(payload)?;
        let value = self
            .request(Method::PUT, "/api/users/me", Some(&body), &RequestOptions::default())
            .await?;
        decode(value)
    }

    /// GET `/api/users?skip=&limit=`. Admin-expected; `token` overrides the
    /// stored session token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn list_users(
        &self,
        skip: u32,
        limit: u32,
        token: Option<&str>,
    ) -> Result<Vec<User>, ApiError> {
        let value = self
            .request(
                Method::GET,
                &list_users_path(skip, limit),
                None,
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }

    /// POST `/api/users/{id}/activate`. The endpoint requires an empty JSON
    /// object body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn activate_user(&self, id: i64, token: Option<&str>) -> Result<User, ApiError> {
        let body = serde_json::json!({});
        let value = self
            .request(
                Method::POST,
                &user_action_path(id, "activate"),
                Some(&body),
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }

    /// POST `/api/users/{id}/deactivate`, no body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn deactivate_user(&self, id: i64, token: Option<&str>) -> Result<User, ApiError> {
        let value = self
            .request(
                Method::POST,
                &user_action_path(id, "deactivate"),
                None,
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }

    /// PUT `/api/users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn update_user(
        &self,
        id: i64,
        payload: &UserUpdate,
        token: Option<&str>,
    ) -> Result<User, ApiError> {
        let body = to_body(payload)?;
        let value = self
            .request(
                Method::PUT,
                &user_path(id),
                Some(&body),
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
