//! Client library for the AusVisa immigration-advisory backend.
//!
//! This crate is the single choke point for backend access: it owns the
//! persisted session (bearer token plus cached user profile), builds outbound
//! request headers, and normalizes every failure into one typed contract
//! ([`ApiError`]) that consumers match on instead of probing error types.
//!
//! The endpoint wrappers in [`users`] and [`chatbot`] carry no logic of their
//! own; each is a one-line composition of [`ApiClient::request`] with a fixed
//! path, method, and auth mode.

pub mod chatbot;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod users;

pub use chatbot::{ChatMessagePayload, ChatbotResponse, ConversationMessage, ConversationSummary};
pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind};
pub use session::{FileBackend, MemoryBackend, SessionBackend, SessionStore, StoredAuth};
pub use users::{LoginResponse, RegisterPayload, User, UserUpdate};
