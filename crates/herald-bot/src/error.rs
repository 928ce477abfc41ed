use crate::transport::TransportError;
use herald_assistant::AssistantError;
use herald_pitch::PitchError;
use herald_types::RunStatus;
use herald_voice::VoiceError;
use thiserror::Error;

/// Failures a pipeline run can end in; all of them are converted to a
/// single user-visible message at the orchestrator boundary.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Voice(#[from] VoiceError),

    #[error(transparent)]
    Pitch(#[from] PitchError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The run reached a terminal status other than `completed`.
    #[error("assistant run ended as {}", .0.label())]
    RunNotCompleted(RunStatus),
}
