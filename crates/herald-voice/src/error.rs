use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transcription error: {0}")]
    Transcription(String),

    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    #[error("audio transcoding error: {0}")]
    Codec(String),
}
