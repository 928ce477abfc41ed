//! Chat-transport boundary.
//!
//! The pipelines consume this trait and nothing else about the messaging
//! platform; the Telegram implementation lives in [`crate::telegram`] and
//! tests substitute recording fakes.

use async_trait::async_trait;
use herald_types::{ChatId, UserId};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chat api error: {0}")]
    Api(String),
}

/// Reference to a file held by the chat platform, resolvable via
/// [`ChatTransport::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef(pub String);

/// An inbound chat event, already classified for dispatch.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// A bot command such as `/start` or `/help`.
    Command {
        chat: ChatId,
        user: UserId,
        command: String,
    },
    /// A voice message. `event_id` is the platform's message id, used to
    /// name the downloaded artifact uniquely within the user's workdir.
    Voice {
        chat: ChatId,
        user: UserId,
        file: FileRef,
        event_id: i64,
    },
    /// Anything else; `text` is present for plain text messages.
    Other {
        chat: ChatId,
        user: UserId,
        text: Option<String>,
    },
}

impl InboundEvent {
    pub fn chat(&self) -> ChatId {
        match self {
            Self::Command { chat, .. } | Self::Voice { chat, .. } | Self::Other { chat, .. } => {
                *chat
            }
        }
    }
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a plain text reply.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError>;

    /// Sends a local audio file as a voice message.
    async fn send_voice(&self, chat: ChatId, audio: &Path) -> Result<(), TransportError>;

    /// Downloads a platform-held file to `dest`.
    async fn download(&self, file: &FileRef, dest: &Path) -> Result<(), TransportError>;
}
