//! Failure contract shared by every endpoint wrapper.
//!
//! DESIGN
//! ======
//! One discriminated error type instead of per-caller type probing: transport
//! failures, non-2xx responses, and payload-shape mismatches each map to a
//! distinct variant, and consumers branch on [`ApiError::kind`]. A 401 is the
//! only status with dedicated handling (forced logout), exposed through
//! [`ApiError::is_unauthorized`].

use serde_json::Value;

/// Generic user-facing fallback when neither the body nor the HTTP status
/// supplies a message. The product ships in Vietnamese.
pub const FALLBACK_ERROR_MESSAGE: &str = "Đã có lỗi xảy ra. Vui lòng thử lại.";

/// Errors produced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: no HTTP response was obtained (DNS, refused
    /// connection, closed socket).
    #[error("network request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Human-readable message: the body's `detail` or `message` field,
        /// the status canonical reason, or a generic fallback, in that order.
        message: String,
        /// Raw parsed body, for callers that need structured detail.
        /// `None` when the body was absent or not valid JSON.
        detail: Option<Value>,
    },

    /// A success payload did not deserialize into the wrapper's typed shape.
    #[error("response validation failed: {0}")]
    Validation(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Coarse error category for consumer-side matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response obtained; present a generic retry message.
    Network,
    /// Response obtained with a non-2xx status; message comes from the server.
    Http,
    /// Response obtained but its shape was unexpected.
    Validation,
}

impl ApiError {
    /// Coarse category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::ClientBuild(_) => ErrorKind::Network,
            Self::Http { .. } => ErrorKind::Http,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// HTTP status code, when a response was obtained.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for 401 responses. Consumers react by clearing the stored
    /// session and forcing a fresh login; the client never does this itself.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
