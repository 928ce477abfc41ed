//! Speech-to-text port and its HTTP implementation.

use crate::error::VoiceError;
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Maximum audio upload size (25 MiB, the provider's documented limit).
const MAX_AUDIO_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribes an audio payload to plain text. `file_name` carries the
    /// container extension the provider uses to pick a decoder.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, VoiceError>;
}

/// Transcription via an OpenAI-compatible `/audio/transcriptions` endpoint.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl TranscriptionClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl SpeechToText for TranscriptionClient {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, VoiceError> {
        if audio.len() > MAX_AUDIO_UPLOAD_BYTES {
            return Err(VoiceError::Transcription(format!(
                "audio exceeds maximum upload size: {} bytes (limit: {} bytes)",
                audio.len(),
                MAX_AUDIO_UPLOAD_BYTES
            )));
        }

        let file = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| VoiceError::Transcription(format!("invalid mime type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "text");

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(VoiceError::Transcription(format!(
                "provider returned {status}: {body}"
            )));
        }
        Ok(body.trim().to_string())
    }
}
