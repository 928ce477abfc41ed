//! Text-to-speech port and its HTTP implementation.

use crate::error::VoiceError;
use async_trait::async_trait;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Maximum text input size for synthesis (the provider caps input at 4096
/// characters).
const MAX_SYNTHESIS_INPUT_CHARS: usize = 4096;

#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesizes speech from text; returns audio bytes in the provider's
    /// native container (MP3).
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError>;
}

/// Synthesis via an OpenAI-compatible `/audio/speech` endpoint.
#[derive(Debug, Clone)]
pub struct SynthesisClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    voice: String,
}

impl SynthesisClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model, voice)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            voice: voice.into(),
        }
    }
}

#[async_trait]
impl TextToSpeech for SynthesisClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        if text.chars().count() > MAX_SYNTHESIS_INPUT_CHARS {
            return Err(VoiceError::Synthesis(format!(
                "text exceeds maximum input size: {} chars (limit: {})",
                text.chars().count(),
                MAX_SYNTHESIS_INPUT_CHARS
            )));
        }

        let response = self
            .http
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "voice": self.voice,
                "input": text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Synthesis(format!(
                "provider returned {status}: {body}"
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
