//! The two codec directions of the voice pipeline.
//!
//! Inbound: downloaded voice message → MP3 → transcription → text.
//! Outbound: reply text → synthesized MP3 → OGG voice message.
//!
//! Both directions route every temporary file through [`AudioArtifact`]
//! guards, so the original download and all intermediates are removed on
//! success and on every failure path alike. Only the final outbound OGG
//! leaves the bridge, still guarded, for the caller to send and drop.

use crate::error::VoiceError;
use crate::stt::SpeechToText;
use crate::transcode::AudioTranscoder;
use crate::tts::TextToSpeech;
use crate::workdir::{AudioArtifact, WorkdirRoot};
use herald_types::{UserId, Utterance};
use std::sync::Arc;
use tracing::debug;

pub struct VoiceCodecBridge {
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
    transcoder: Arc<dyn AudioTranscoder>,
    root: WorkdirRoot,
}

impl VoiceCodecBridge {
    pub fn new(
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
        transcoder: Arc<dyn AudioTranscoder>,
        root: WorkdirRoot,
    ) -> Self {
        Self {
            stt,
            tts,
            transcoder,
            root,
        }
    }

    /// Claims a destination for an incoming voice download inside the
    /// user's working directory. The caller writes the file; the guard
    /// owns its deletion.
    pub fn claim_download(
        &self,
        user: UserId,
        file_name: &str,
    ) -> Result<AudioArtifact, VoiceError> {
        let workdir = self.root.for_user(user)?;
        Ok(workdir.claim(file_name))
    }

    /// Transcribes a downloaded voice message.
    ///
    /// Takes ownership of the original artifact; both it and the MP3
    /// intermediate are deleted when this function returns, whether
    /// transcoding or transcription succeeded or not.
    pub async fn inbound(
        &self,
        user: UserId,
        original: AudioArtifact,
    ) -> Result<Utterance, VoiceError> {
        let stem = original
            .path()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("voice")
            .to_string();

        let workdir = self.root.for_user(user)?;
        let intermediate = workdir.claim(&format!("{stem}.mp3"));

        self.transcoder
            .transcode(original.path(), intermediate.path())
            .await?;

        let audio = tokio::fs::read(intermediate.path()).await?;
        let text = self
            .stt
            .transcribe(audio, &format!("{stem}.mp3"))
            .await?;

        debug!(%user, chars = text.len(), "transcribed voice message");
        Ok(Utterance {
            user,
            text,
            source_stem: stem,
        })
    }

    /// Renders reply text as an OGG voice message.
    ///
    /// The synthesized MP3 intermediate is deleted on every exit path; the
    /// returned OGG is still guarded and is deleted when the caller drops
    /// it after sending.
    pub async fn outbound(
        &self,
        user: UserId,
        stem: &str,
        text: &str,
    ) -> Result<AudioArtifact, VoiceError> {
        let workdir = self.root.for_user(user)?;

        let audio = self.tts.synthesize(text).await?;
        let intermediate = workdir.claim(&format!("{stem}.reply.mp3"));
        tokio::fs::write(intermediate.path(), &audio).await?;

        let reply = workdir.claim(&format!("{stem}.reply.ogg"));
        self.transcoder
            .transcode(intermediate.path(), reply.path())
            .await?;

        debug!(%user, bytes = audio.len(), "synthesized voice reply");
        Ok(reply)
    }
}
