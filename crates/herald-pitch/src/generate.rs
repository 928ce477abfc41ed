//! Text-generation provider client.

use crate::error::PitchError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Output budget for one pitch.
const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Placeholder the generation provider leaves in sign-offs; stripped before
/// the pitch reaches the user.
const SIGNATURE_PLACEHOLDER: &str = "[Your Name]";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates pitch text from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, PitchError>;
}

/// Generation against a Cohere-style `/generate` endpoint.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, PitchError> {
        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "truncate": "END",
                "return_likelihoods": "NONE",
                "max_tokens": MAX_OUTPUT_TOKENS,
                "prompt": prompt,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PitchError::Generation(format!(
                "provider returned {status}: {body}"
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .generations
            .into_iter()
            .next()
            .map(|g| g.text)
            .ok_or_else(|| PitchError::Generation("response carried no generations".into()))?;

        debug!(chars = text.len(), "generated pitch");
        Ok(clean_output(&text))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

fn clean_output(text: &str) -> String {
    text.replace(SIGNATURE_PLACEHOLDER, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_placeholder_is_stripped() {
        let cleaned = clean_output("Best regards,\n[Your Name]\nHead of Business Department");
        assert_eq!(cleaned, "Best regards,\n\nHead of Business Department");
    }

    #[test]
    fn response_without_generations_is_detectable() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(body.generations.is_empty());
    }
}
