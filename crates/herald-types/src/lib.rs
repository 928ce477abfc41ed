//! Shared identifiers and provider-agnostic data types for the Herald bots.
//!
//! Every other crate in the workspace depends only on `herald-types` for
//! cross-cutting definitions, which keeps the dependency graph acyclic:
//! the assistant client, the voice bridge, and the pitch generator all
//! speak in terms of these types without knowing about each other.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod profile;
pub mod run;

pub use profile::CompanyProfile;
pub use run::{Run, RunStatus};

/// Opaque identifier of a chat participant.
///
/// Keys the session registry; one conversation thread exists per `UserId`
/// for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Destination chat for outbound replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Provider-owned conversation thread handle.
///
/// Created by the assistant provider and never synthesized locally; the
/// registry holds a non-owning reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Provider-owned run handle for one processing cycle over a thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Provider-owned message handle returned when a turn is appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One transcribed user turn, alive for a single pipeline invocation.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// The user the turn belongs to.
    pub user: UserId,
    /// Transcribed text.
    pub text: String,
    /// File stem of the source audio artifact, reused for the reply audio.
    pub source_stem: String,
}
