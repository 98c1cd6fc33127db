//! Chatbot endpoints: send a message, list conversations, replay history.
//!
//! Conversation records are opaque backend data; the client lists and replays
//! them, never computes over them. Note the backend's conversation routes are
//! spelled `conservations` — that misspelling is the wire contract.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiClient, RequestOptions, decode, to_body};
use crate::error::ApiError;

// =============================================================================
// TYPES
// =============================================================================

/// Request body for sending a chat turn. Omitting `conversation_id` starts a
/// new conversation; `title` names it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Query analysis attached to a chatbot answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
}

/// A chatbot answer for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ChatAnalysis>,
    /// Structured retrieval results backing the answer, shape unspecified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    /// Conversation this turn was appended to (created server-side when the
    /// request carried none).
    pub conversation_id: i64,
}

/// Sender of a conversation turn; the wire values are `"user"` and
/// `"assistant"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A chat thread as listed in the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

/// A single stored turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: i64,
    pub conversation_id: i64,
    pub role: MessageRole,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

// =============================================================================
// PATHS
// =============================================================================

const CONVERSATIONS_PATH: &str = "/api/chatbot/conservations";

fn conversation_details_path(id: i64) -> String {
    format!("{CONVERSATIONS_PATH}/{id}/details")
}

// =============================================================================
// ENDPOINTS
// =============================================================================

impl ApiClient {
    /// POST `/api/chatbot/message`. Bearer is optional: the stored or
    /// override token is attached when present, but anonymous sends are
    /// allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// unexpected payload shape.
    pub async fn send_chat_message(
        &self,
        payload: &ChatMessagePayload,
        token: Option<&str>,
    ) -> Result<ChatbotResponse, ApiError> {
        let body = to_body(payload)?;
        let value = self
            .request(
                Method::POST,
                "/api/chatbot/message",
                Some(&body),
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }

    /// GET `/api/chatbot/conservations`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn list_conversations(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<ConversationSummary>, ApiError> {
        let value = self
            .request(
                Method::GET,
                CONVERSATIONS_PATH,
                None,
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }

    /// GET `/api/chatbot/conservations/{id}/details`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any failed exchange.
    pub async fn fetch_conversation_messages(
        &self,
        conversation_id: i64,
        token: Option<&str>,
    ) -> Result<Vec<ConversationMessage>, ApiError> {
        let value = self
            .request(
                Method::GET,
                &conversation_details_path(conversation_id),
                None,
                &RequestOptions::with_token(token),
            )
            .await?;
        decode(value)
    }
}

#[cfg(test)]
#[path = "chatbot_test.rs"]
mod tests;
