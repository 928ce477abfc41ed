//! Pipeline orchestrators and the user-visible message catalogue.
//!
//! Each orchestrator guarantees exactly one outcome per inbound event:
//! either the real reply (voice message or pitch text) or a single error
//! message, never both, never neither. Progress acknowledgements sent
//! before the slow part of a pipeline are separate from the outcome.

pub mod pitch;
pub mod voice;

pub use pitch::PitchPipeline;
pub use voice::VoicePipeline;

use crate::error::BotError;
use crate::transport::ChatTransport;
use herald_pitch::PitchError;
use herald_types::ChatId;
use tracing::error;

pub const WELCOME_VOICE: &str = "Hi! Send me a voice message and I'll answer with one.";
pub const WELCOME_PITCH: &str =
    "Hi! Send me a link to a company's LinkedIn page and I'll draft a pitch for a prospective client.";
pub const PROCESSING: &str = "Your message is being processed. This may take a little while.";
pub const PITCH_ACK: &str = "Processing your request, this may take a few seconds...";
pub const UNSUPPORTED_MESSAGE: &str = "I can only work with voice messages. Please send one.";
pub const SEND_COMPANY_URL: &str = "Please send a link to a company's LinkedIn page.";
pub const GENERIC_RETRY: &str = "Something went wrong, please try again.";
pub const INVALID_COMPANY_URL: &str =
    "This bot accepts links to company pages only, not personal profile pages.";
pub const MISSING_COMPANY_NAME: &str = "The profile data does not contain a company name.";
pub const GENERATION_FAILED: &str = "Could not generate a pitch. Please try again.";

/// Maps a pipeline failure to the single message the user sees.
///
/// Only user-correctable failures get specific wording; provider statuses
/// `failed`, `cancelled` and `expired` collapse into the generic retry
/// prompt (the distinction is preserved in the logs).
pub fn user_message(err: &BotError) -> String {
    match err {
        BotError::Pitch(PitchError::InvalidInputUrl) => INVALID_COMPANY_URL.to_string(),
        BotError::Pitch(PitchError::MissingCompanyName) => MISSING_COMPANY_NAME.to_string(),
        BotError::Pitch(PitchError::Profile(detail)) => format!("{GENERIC_RETRY} ({detail})"),
        BotError::Pitch(PitchError::Generation(_)) => GENERATION_FAILED.to_string(),
        _ => GENERIC_RETRY.to_string(),
    }
}

/// Sends a text reply; a delivery failure is logged, not propagated, so it
/// cannot turn one user-visible outcome into two.
pub(crate) async fn send_or_log(transport: &dyn ChatTransport, chat: ChatId, text: &str) {
    if let Err(err) = transport.send_text(chat, text).await {
        error!(%chat, %err, "failed to send text reply");
    }
}
