//! Port for the conversational-assistant provider.
//!
//! The poller, the session registry, and the bot orchestrator all depend on
//! this trait rather than on the HTTP client, so they can be tested against
//! in-memory fakes.

use crate::error::AssistantError;
use async_trait::async_trait;
use herald_types::{MessageId, Run, RunId, RunStatus, ThreadId};

#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Creates a new conversation thread owned by the provider.
    async fn create_thread(&self) -> Result<ThreadId, AssistantError>;

    /// Appends a user turn to the given thread.
    ///
    /// A failed submission is an `Err`; callers must not start a run for a
    /// turn that was never accepted.
    async fn add_user_message(
        &self,
        thread: &ThreadId,
        text: &str,
    ) -> Result<MessageId, AssistantError>;

    /// Starts a processing run over the thread's pending turns.
    async fn create_run(&self, thread: &ThreadId) -> Result<Run, AssistantError>;

    /// Fetches the current status of a run.
    async fn run_status(&self, thread: &ThreadId, run: &RunId)
        -> Result<RunStatus, AssistantError>;

    /// Returns the text of the newest message on the thread.
    ///
    /// Text parts of that message are concatenated with `\n` in their given
    /// order; fails with [`AssistantError::EmptyResponse`] when the newest
    /// message carries no text parts.
    async fn latest_reply(&self, thread: &ThreadId) -> Result<String, AssistantError>;
}
