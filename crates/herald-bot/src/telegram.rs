//! Telegram Bot API implementation of the chat transport.
//!
//! Covers the five calls the bots need: `getUpdates` long polling,
//! `sendMessage`, `sendVoice`, `getFile`, and the file download itself.

use crate::transport::{ChatTransport, FileRef, InboundEvent, TransportError};
use async_trait::async_trait;
use herald_types::{ChatId, UserId};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tracing::debug;

/// Long-poll wait passed to `getUpdates`, seconds.
const LONG_POLL_SECS: u64 = 50;

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    file_base: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_base embeds the bot token.
        f.debug_struct("TelegramClient")
            .field("api_base", &"[REDACTED]")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: format!("https://api.telegram.org/bot{token}"),
            file_base: format!("https://api.telegram.org/file/bot{token}"),
        }
    }

    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, TransportError> {
        let response = self
            .http
            .post(format!("{}/{method}", self.api_base))
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let envelope: ApiEnvelope<T> = response.json().await?;
        if !envelope.ok {
            return Err(TransportError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown telegram error".into()),
            ));
        }
        envelope
            .result
            .ok_or_else(|| TransportError::Api("missing result".into()))
    }

    /// Fetches updates past `offset` and classifies them into inbound
    /// events. Returns `(next_offset, events)`.
    pub async fn poll_events(
        &self,
        offset: i64,
    ) -> Result<(i64, Vec<InboundEvent>), TransportError> {
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                json!({ "offset": offset, "timeout": LONG_POLL_SECS }),
            )
            .await?;

        let mut next_offset = offset;
        let mut events = Vec::new();
        for update in updates {
            next_offset = next_offset.max(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };
            let Some(from_id) = message.from.as_ref().map(|f| f.id) else {
                continue;
            };
            events.push(classify(message.chat.id, from_id, message));
        }
        Ok((next_offset, events))
    }
}

fn classify(chat_id: i64, user_id: i64, message: Message) -> InboundEvent {
    let chat = ChatId(chat_id);
    let user = UserId(user_id);

    if let Some(voice) = message.voice {
        return InboundEvent::Voice {
            chat,
            user,
            file: FileRef(voice.file_id),
            event_id: message.message_id,
        };
    }
    if let Some(text) = &message.text {
        if let Some(command) = text.strip_prefix('/') {
            return InboundEvent::Command {
                chat,
                user,
                command: command.split_whitespace().next().unwrap_or("").to_string(),
            };
        }
    }
    InboundEvent::Other {
        chat,
        user,
        text: message.text,
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        let _: IgnoredResult = self
            .call("sendMessage", json!({ "chat_id": chat.0, "text": text }))
            .await?;
        Ok(())
    }

    async fn send_voice(&self, chat: ChatId, audio: &Path) -> Result<(), TransportError> {
        let bytes = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("voice.ogg")
            .to_string();
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat.0.to_string())
            .part(
                "voice",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let response = self
            .http
            .post(format!("{}/sendVoice", self.api_base))
            .multipart(form)
            .send()
            .await?;
        let _: IgnoredResult = Self::parse(response).await?;
        Ok(())
    }

    async fn download(&self, file: &FileRef, dest: &Path) -> Result<(), TransportError> {
        let info: FileInfo = self
            .call("getFile", json!({ "file_id": file.0 }))
            .await?;
        let file_path = info
            .file_path
            .ok_or_else(|| TransportError::Api("getFile returned no file_path".into()))?;

        let response = self
            .http
            .get(format!("{}/{file_path}", self.file_base))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TransportError::Api(format!(
                "file download returned {}",
                response.status()
            )));
        }
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        debug!(bytes = bytes.len(), dest = %dest.display(), "downloaded voice file");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

/// `sendMessage`/`sendVoice` results are not used beyond the `ok` flag.
#[derive(Debug, Deserialize)]
struct IgnoredResult {}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    message_id: i64,
    from: Option<Sender>,
    chat: Chat,
    text: Option<String>,
    voice: Option<Voice>,
}

#[derive(Debug, Deserialize)]
struct Sender {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Voice {
    file_id: String,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    file_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: &str) -> Message {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn voice_messages_classify_as_voice() {
        let msg = message(
            r#"{"message_id":5,"from":{"id":1},"chat":{"id":2},"voice":{"file_id":"abc"}}"#,
        );
        match classify(2, 1, msg) {
            InboundEvent::Voice {
                chat,
                user,
                file,
                event_id,
            } => {
                assert_eq!(chat, ChatId(2));
                assert_eq!(user, UserId(1));
                assert_eq!(file, FileRef("abc".into()));
                assert_eq!(event_id, 5);
            }
            other => panic!("expected Voice, got {other:?}"),
        }
    }

    #[test]
    fn slash_prefixed_text_classifies_as_command() {
        let msg = message(
            r#"{"message_id":6,"from":{"id":1},"chat":{"id":2},"text":"/start now"}"#,
        );
        match classify(2, 1, msg) {
            InboundEvent::Command { command, .. } => assert_eq!(command, "start"),
            other => panic!("expected Command, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_classifies_as_other() {
        let msg = message(
            r#"{"message_id":7,"from":{"id":1},"chat":{"id":2},"text":"https://example.com"}"#,
        );
        match classify(2, 1, msg) {
            InboundEvent::Other { text, .. } => {
                assert_eq!(text.as_deref(), Some("https://example.com"))
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }
}
