//! Conversational core for kokoro.
//!
//! Provides:
//! - An append-only conversation `Session` with a generated identifier
//! - A Gemini `generateContent` client that resends the full transcript
//! - A keyword-based crisis `RiskDetector`
//! - `ChatController`, which runs one user turn-cycle end to end

pub mod controller;
pub mod gemini;
pub mod risk;
pub mod session;

use std::fmt;

use async_trait::async_trait;

pub use controller::{ChatController, TurnOutcome};
pub use gemini::{GeminiClient, GeminiConfig};
pub use risk::{RiskDetector, DEFAULT_RISK_KEYWORDS};
pub use session::{Session, SessionHandle, TurnPhase};

/// A remote generative model that answers one conversation turn.
///
/// The remote side keeps no conversation state; every call carries the
/// whole transcript.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `history` followed by `new_user_text` as a final user block and
    /// return the model's reply text.
    async fn send(
        &self,
        history: &[Turn],
        new_user_text: &str,
        credentials: &Credentials,
    ) -> Result<String, AiError>;
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Role name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Bearer credential for the model endpoint. Supplied per call, never stored
/// by the core.
#[derive(Clone)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only tokens count as missing.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credentials").field(&"[REDACTED]").finish()
    }
}

/// A remote response that was received but cannot be accepted.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response is missing {0}")]
    MissingField(&'static str),
    #[error("prompt blocked: {0}")]
    Blocked(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl AiError {
    /// True when the endpoint rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, AiError::Protocol(ProtocolError::Auth { .. }))
    }
}
