//! Pitch pipeline: company link in, generated sales pitch out.

use crate::error::BotError;
use crate::pipeline::{send_or_log, user_message, PITCH_ACK, SEND_COMPANY_URL, WELCOME_PITCH};
use crate::runner::EventHandler;
use crate::transport::{ChatTransport, InboundEvent};
use async_trait::async_trait;
use herald_pitch::{build_prompt, ProfileSource, TextGenerator};
use herald_types::ChatId;
use std::sync::Arc;
use tracing::{error, info};

/// Orchestrates one pitch request: fetch the company profile, build the
/// prompt, generate, reply. The pitch text is sent only when generation
/// succeeded; every failure becomes a single error message instead.
pub struct PitchPipeline {
    transport: Arc<dyn ChatTransport>,
    profiles: Arc<dyn ProfileSource>,
    generator: Arc<dyn TextGenerator>,
}

impl PitchPipeline {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        profiles: Arc<dyn ProfileSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            transport,
            profiles,
            generator,
        }
    }

    async fn handle_url(&self, chat: ChatId, url: &str) {
        send_or_log(self.transport.as_ref(), chat, PITCH_ACK).await;

        match self.run_request(url).await {
            Ok(pitch) => {
                info!(%chat, chars = pitch.len(), "pitch generated");
                send_or_log(self.transport.as_ref(), chat, &pitch).await;
            }
            Err(err) => {
                error!(%chat, %err, "pitch pipeline failed");
                send_or_log(self.transport.as_ref(), chat, &user_message(&err)).await;
            }
        }
    }

    async fn run_request(&self, url: &str) -> Result<String, BotError> {
        let profile = self.profiles.fetch_company(url).await?;
        let prompt = build_prompt(&profile)?;
        let pitch = self.generator.generate(&prompt).await?;
        Ok(pitch)
    }
}

#[async_trait]
impl EventHandler for PitchPipeline {
    async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::Command { chat, .. } => {
                send_or_log(self.transport.as_ref(), chat, WELCOME_PITCH).await;
            }
            InboundEvent::Other {
                chat,
                text: Some(text),
                ..
            } => {
                self.handle_url(chat, text.trim()).await;
            }
            event => {
                send_or_log(self.transport.as_ref(), event.chat(), SEND_COMPANY_URL).await;
            }
        }
    }
}
