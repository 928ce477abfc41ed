//! Voice pipeline: speech in, assistant round-trip, speech out.

use crate::error::BotError;
use crate::pipeline::{
    send_or_log, user_message, GENERIC_RETRY, PROCESSING, UNSUPPORTED_MESSAGE, WELCOME_VOICE,
};
use crate::runner::EventHandler;
use crate::transport::{ChatTransport, FileRef, InboundEvent};
use async_trait::async_trait;
use herald_assistant::{await_completion, AssistantApi, PollSchedule, SessionRegistry};
use herald_types::{ChatId, RunStatus, UserId};
use herald_voice::{AudioArtifact, VoiceCodecBridge};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Orchestrates one voice turn per inbound voice message:
/// download → transcribe → submit to the user's thread → run + poll →
/// extract reply → synthesize → send voice.
pub struct VoicePipeline {
    transport: Arc<dyn ChatTransport>,
    api: Arc<dyn AssistantApi>,
    registry: SessionRegistry,
    bridge: VoiceCodecBridge,
    schedule: PollSchedule,
}

impl VoicePipeline {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        api: Arc<dyn AssistantApi>,
        bridge: VoiceCodecBridge,
        schedule: PollSchedule,
    ) -> Self {
        Self {
            transport,
            api,
            registry: SessionRegistry::new(),
            bridge,
            schedule,
        }
    }

    async fn handle_voice(&self, chat: ChatId, user: UserId, file: FileRef, event_id: i64) {
        match self.run_turn(chat, user, &file, event_id).await {
            Ok(reply) => {
                if let Err(err) = self.transport.send_voice(chat, reply.path()).await {
                    error!(%chat, %err, "failed to deliver voice reply");
                    send_or_log(self.transport.as_ref(), chat, GENERIC_RETRY).await;
                }
                // The reply artifact is deleted here, after delivery was
                // attempted.
                drop(reply);
            }
            Err(err) => {
                error!(%chat, %user, %err, "voice pipeline failed");
                send_or_log(self.transport.as_ref(), chat, &user_message(&err)).await;
            }
        }
    }

    async fn run_turn(
        &self,
        chat: ChatId,
        user: UserId,
        file: &FileRef,
        event_id: i64,
    ) -> Result<AudioArtifact, BotError> {
        let original = self
            .bridge
            .claim_download(user, &format!("voice_{event_id}.oga"))?;
        self.transport.download(file, original.path()).await?;

        let utterance = self.bridge.inbound(user, original).await?;
        info!(%user, chars = utterance.text.len(), "voice message transcribed");

        let thread = self.registry.resolve_or_create(user, self.api.as_ref()).await?;

        // The turn must be accepted before a run is started; a failed
        // submission aborts here instead of polling a run that was never
        // fed the message.
        self.api.add_user_message(&thread, &utterance.text).await?;
        send_or_log(self.transport.as_ref(), chat, PROCESSING).await;

        let run = self.api.create_run(&thread).await?;
        let status =
            await_completion(self.api.as_ref(), &thread, &run.id, &self.schedule).await?;
        if status != RunStatus::Completed {
            warn!(%thread, run = %run.id, status = status.label(), "run ended without completion");
            return Err(BotError::RunNotCompleted(status));
        }

        let reply_text = self.api.latest_reply(&thread).await?;
        let reply = self
            .bridge
            .outbound(user, &utterance.source_stem, &reply_text)
            .await?;
        Ok(reply)
    }
}

#[async_trait]
impl EventHandler for VoicePipeline {
    async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::Command { chat, .. } => {
                send_or_log(self.transport.as_ref(), chat, WELCOME_VOICE).await;
            }
            InboundEvent::Voice {
                chat,
                user,
                file,
                event_id,
            } => {
                self.handle_voice(chat, user, file, event_id).await;
            }
            InboundEvent::Other { chat, .. } => {
                send_or_log(self.transport.as_ref(), chat, UNSUPPORTED_MESSAGE).await;
            }
        }
    }
}
