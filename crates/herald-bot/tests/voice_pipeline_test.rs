//! End-to-end voice pipeline behavior against in-memory providers.

use async_trait::async_trait;
use herald_assistant::{AssistantApi, AssistantError, PollSchedule};
use herald_bot::pipeline::{self, VoicePipeline};
use herald_bot::runner::EventHandler;
use herald_bot::transport::{ChatTransport, FileRef, InboundEvent, TransportError};
use herald_types::{ChatId, MessageId, Run, RunId, RunStatus, ThreadId, UserId};
use herald_voice::{
    AudioTranscoder, SpeechToText, TextToSpeech, VoiceCodecBridge, VoiceError, WorkdirRoot,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct RecordingTransport {
    texts: Mutex<Vec<(ChatId, String)>>,
    voices: Mutex<Vec<(ChatId, PathBuf)>>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self {
            texts: Mutex::new(Vec::new()),
            voices: Mutex::new(Vec::new()),
        }
    }

    fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }

    fn voice_count(&self) -> usize {
        self.voices.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.texts.lock().unwrap().push((chat, text.to_string()));
        Ok(())
    }

    async fn send_voice(&self, chat: ChatId, audio: &Path) -> Result<(), TransportError> {
        assert!(audio.exists(), "voice reply must exist while being sent");
        self.voices
            .lock()
            .unwrap()
            .push((chat, audio.to_path_buf()));
        Ok(())
    }

    async fn download(&self, _file: &FileRef, dest: &Path) -> Result<(), TransportError> {
        tokio::fs::write(dest, b"fake opus payload").await?;
        Ok(())
    }
}

struct ScriptedAssistant {
    reply: &'static str,
    terminal: RunStatus,
    submit_fails: bool,
    runs_created: AtomicUsize,
    submitted: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    fn completing(reply: &'static str) -> Self {
        Self {
            reply,
            terminal: RunStatus::Completed,
            submit_fails: false,
            runs_created: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssistantApi for ScriptedAssistant {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        Ok(ThreadId("thread_1".into()))
    }

    async fn add_user_message(
        &self,
        _thread: &ThreadId,
        text: &str,
    ) -> Result<MessageId, AssistantError> {
        if self.submit_fails {
            return Err(AssistantError::Api {
                status: 500,
                message: "submission rejected".into(),
            });
        }
        self.submitted.lock().unwrap().push(text.to_string());
        Ok(MessageId("msg_1".into()))
    }

    async fn create_run(&self, thread: &ThreadId) -> Result<Run, AssistantError> {
        self.runs_created.fetch_add(1, Ordering::SeqCst);
        Ok(Run {
            id: RunId("run_1".into()),
            thread_id: thread.clone(),
            status: RunStatus::Queued,
            created_at: 0,
        })
    }

    async fn run_status(
        &self,
        _thread: &ThreadId,
        _run: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        Ok(self.terminal)
    }

    async fn latest_reply(&self, _thread: &ThreadId) -> Result<String, AssistantError> {
        Ok(self.reply.to_string())
    }
}

struct FixedTranscript(&'static str);

#[async_trait]
impl SpeechToText for FixedTranscript {
    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<String, VoiceError> {
        Ok(self.0.to_string())
    }
}

struct SilentSynthesis;

#[async_trait]
impl TextToSpeech for SilentSynthesis {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, VoiceError> {
        Ok(vec![0u8; 64])
    }
}

struct CopyTranscoder;

#[async_trait]
impl AudioTranscoder for CopyTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), VoiceError> {
        tokio::fs::copy(input, output).await?;
        Ok(())
    }
}

fn pipeline(
    transport: Arc<RecordingTransport>,
    assistant: Arc<ScriptedAssistant>,
    root: &Path,
) -> VoicePipeline {
    let bridge = VoiceCodecBridge::new(
        Arc::new(FixedTranscript("book a demo")),
        Arc::new(SilentSynthesis),
        Arc::new(CopyTranscoder),
        WorkdirRoot::new(root),
    );
    VoicePipeline::new(transport, assistant, bridge, PollSchedule::default())
}

fn voice_event() -> InboundEvent {
    InboundEvent::Voice {
        chat: ChatId(100),
        user: UserId(1),
        file: FileRef("file_abc".into()),
        event_id: 7,
    }
}

#[tokio::test]
async fn voice_round_trip_sends_exactly_one_voice_reply() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let assistant = Arc::new(ScriptedAssistant::completing("Sure, let's talk"));
    let pipeline = pipeline(transport.clone(), assistant.clone(), tmp.path());

    pipeline.handle(voice_event()).await;

    assert_eq!(transport.voice_count(), 1);
    // The only text sent is the progress note, never an error.
    assert_eq!(transport.texts(), vec![pipeline::PROCESSING.to_string()]);
    assert_eq!(
        *assistant.submitted.lock().unwrap(),
        vec!["book a demo".to_string()]
    );

    // Every artifact of the invocation is gone afterwards.
    let workdir = tmp.path().join("1");
    let leftovers: Vec<_> = std::fs::read_dir(&workdir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(leftovers.is_empty(), "leftover files: {leftovers:?}");
}

#[tokio::test]
async fn failed_submission_aborts_before_any_run() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let assistant = Arc::new(ScriptedAssistant {
        submit_fails: true,
        ..ScriptedAssistant::completing("unused")
    });
    let pipeline = pipeline(transport.clone(), assistant.clone(), tmp.path());

    pipeline.handle(voice_event()).await;

    assert_eq!(assistant.runs_created.load(Ordering::SeqCst), 0);
    assert_eq!(transport.voice_count(), 0);
    assert_eq!(transport.texts(), vec![pipeline::GENERIC_RETRY.to_string()]);
}

#[tokio::test]
async fn failed_run_yields_single_error_message() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let assistant = Arc::new(ScriptedAssistant {
        terminal: RunStatus::Failed,
        ..ScriptedAssistant::completing("unused")
    });
    let pipeline = pipeline(transport.clone(), assistant.clone(), tmp.path());

    pipeline.handle(voice_event()).await;

    assert_eq!(transport.voice_count(), 0);
    assert_eq!(
        transport.texts(),
        vec![
            pipeline::PROCESSING.to_string(),
            pipeline::GENERIC_RETRY.to_string()
        ]
    );
}

#[tokio::test]
async fn non_voice_input_gets_unsupported_reply() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let assistant = Arc::new(ScriptedAssistant::completing("unused"));
    let pipeline = pipeline(transport.clone(), assistant, tmp.path());

    pipeline
        .handle(InboundEvent::Other {
            chat: ChatId(100),
            user: UserId(1),
            text: Some("hello".into()),
        })
        .await;

    assert_eq!(transport.voice_count(), 0);
    assert_eq!(
        transport.texts(),
        vec![pipeline::UNSUPPORTED_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn command_gets_welcome_text() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = Arc::new(RecordingTransport::new());
    let assistant = Arc::new(ScriptedAssistant::completing("unused"));
    let pipeline = pipeline(transport.clone(), assistant, tmp.path());

    pipeline
        .handle(InboundEvent::Command {
            chat: ChatId(100),
            user: UserId(1),
            command: "start".into(),
        })
        .await;

    assert_eq!(transport.texts(), vec![pipeline::WELCOME_VOICE.to_string()]);
}
