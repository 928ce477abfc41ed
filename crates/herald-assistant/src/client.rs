//! HTTP implementation of [`AssistantApi`] against an OpenAI-compatible
//! assistants endpoint (threads, messages, runs).

use crate::api::AssistantApi;
use crate::error::AssistantError;
use async_trait::async_trait;
use herald_types::{MessageId, Run, RunId, RunStatus, ThreadId};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the assistant provider's REST surface.
///
/// Holds the assistant identifier used when starting runs; threads and
/// messages are provider-owned and referenced only by id.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    assistant_id: String,
}

impl AssistantClient {
    pub fn new(api_key: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, assistant_id)
    }

    /// Points the client at a non-default endpoint (compatible gateways,
    /// test servers).
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        assistant_id: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            assistant_id: assistant_id.into(),
        }
    }

    /// Creates an assistant resource and returns a client bound to it.
    ///
    /// Used at startup when configuration does not pin an existing
    /// assistant id.
    pub async fn create_assistant(
        base_url: &str,
        api_key: &str,
        name: &str,
        model: &str,
        instructions: &str,
    ) -> Result<Self, AssistantError> {
        let mut client = Self::with_base_url(base_url, api_key, String::new());
        let created: ObjectRef = client
            .post_json(
                "/assistants",
                &json!({
                    "name": name,
                    "model": model,
                    "instructions": instructions,
                }),
            )
            .await?;
        debug!(assistant_id = %created.id, "created assistant");
        client.assistant_id = created.id;
        Ok(client)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, AssistantError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, AssistantError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AssistantError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").into(),
            };
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AssistantApi for AssistantClient {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let thread: ObjectRef = self.post_json("/threads", &json!({})).await?;
        Ok(ThreadId(thread.id))
    }

    async fn add_user_message(
        &self,
        thread: &ThreadId,
        text: &str,
    ) -> Result<MessageId, AssistantError> {
        let message: ObjectRef = self
            .post_json(
                &format!("/threads/{thread}/messages"),
                &json!({ "role": "user", "content": text }),
            )
            .await?;
        Ok(MessageId(message.id))
    }

    async fn create_run(&self, thread: &ThreadId) -> Result<Run, AssistantError> {
        self.post_json(
            &format!("/threads/{thread}/runs"),
            &json!({ "assistant_id": self.assistant_id }),
        )
        .await
    }

    async fn run_status(
        &self,
        thread: &ThreadId,
        run: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let run: Run = self
            .get_json(&format!("/threads/{thread}/runs/{run}"))
            .await?;
        Ok(run.status)
    }

    async fn latest_reply(&self, thread: &ThreadId) -> Result<String, AssistantError> {
        let listing: MessageListing = self
            .get_json(&format!("/threads/{thread}/messages"))
            .await?;
        // The provider lists messages most-recent-first.
        let newest = listing
            .data
            .first()
            .ok_or(AssistantError::EmptyResponse)?;
        join_text_parts(newest).ok_or(AssistantError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct ObjectRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct MessageListing {
    data: Vec<ThreadMessage>,
}

#[derive(Debug, Deserialize)]
struct ThreadMessage {
    #[allow(dead_code)]
    id: String,
    content: Vec<ContentPart>,
}

/// One content part of a thread message. Non-text parts (images, file
/// attachments) are ignored for this bot's purpose.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: TextBody },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct TextBody {
    value: String,
}

/// Concatenates the text parts of a message with newline separators, in
/// their given order. `None` when the message has no text parts.
fn join_text_parts(message: &ThreadMessage) -> Option<String> {
    let parts: Vec<&str> = message
        .content
        .iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text.value.as_str()),
            ContentPart::Other => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}
