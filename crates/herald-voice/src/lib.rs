//! Voice codec bridge for the Herald voice bot.
//!
//! Converts between the chat transport's voice containers and the speech
//! providers' formats: inbound OGG is transcoded to MP3 and transcribed,
//! outbound reply text is synthesized to MP3 and transcoded back to OGG
//! for delivery as a voice message.
//!
//! Temporary audio lives in one working directory per user and is wrapped
//! in [`AudioArtifact`] guards, so no intermediate file survives its
//! pipeline invocation regardless of which step fails. Transcoding shells
//! out to ffmpeg; transcription and synthesis are HTTP providers behind
//! the [`SpeechToText`] and [`TextToSpeech`] ports.

pub mod bridge;
pub mod error;
pub mod stt;
pub mod transcode;
pub mod tts;
pub mod workdir;

pub use bridge::VoiceCodecBridge;
pub use error::VoiceError;
pub use stt::{SpeechToText, TranscriptionClient};
pub use transcode::{AudioTranscoder, FfmpegTranscoder};
pub use tts::{SynthesisClient, TextToSpeech};
pub use workdir::{AudioArtifact, UserWorkdir, WorkdirRoot};
