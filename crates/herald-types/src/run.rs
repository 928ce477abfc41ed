//! Run status model for the conversational-assistant provider.
//!
//! A run moves `queued → in_progress → {completed | failed | cancelled |
//! expired}`. Statuses the provider may add later deserialize to
//! [`RunStatus::Other`], which is treated as non-terminal so the poller
//! keeps waiting rather than misreading a transient state as final.

use crate::{RunId, ThreadId};
use serde::{Deserialize, Serialize};

/// Status of one assistant processing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    Expired,
    /// Any status not covered above (e.g. `requires_action`); non-terminal.
    #[serde(other)]
    Other,
}

impl RunStatus {
    /// Returns `true` once no further state transition can occur.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Expired
        )
    }

    /// Stable lowercase label for logging.
    pub fn label(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Other => "other",
        }
    }
}

/// One assistant processing cycle over a thread, as reported by the provider.
///
/// Exists only for the duration of the call that fetched it; nothing is
/// persisted locally.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    /// Provider run identifier.
    pub id: RunId,
    /// The thread this run processes.
    pub thread_id: ThreadId,
    /// Current status.
    pub status: RunStatus,
    /// Provider-side creation time, unix seconds.
    pub created_at: i64,
}
