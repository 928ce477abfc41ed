use herald_types::RunId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("newest thread message has no text content")]
    EmptyResponse,

    #[error("run {run_id} did not reach a terminal status within {deadline_secs}s")]
    PollTimeout { run_id: RunId, deadline_secs: u64 },
}
