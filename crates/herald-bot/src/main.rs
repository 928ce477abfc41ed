//! Herald bot binary — wires providers to the configured pipeline and
//! runs the dispatch loop.

use herald_assistant::{AssistantClient, PollSchedule};
use herald_bot::config::{self, BotMode};
use herald_bot::pipeline::{PitchPipeline, VoicePipeline};
use herald_bot::runner::{run_dispatch_loop, EventHandler};
use herald_bot::telegram::TelegramClient;
use herald_pitch::{GenerationClient, ProfileClient};
use herald_voice::{
    FfmpegTranscoder, SynthesisClient, TranscriptionClient, VoiceCodecBridge, WorkdirRoot,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("HERALD_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration; the bot cannot start without valid config");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        mode = ?config.bot.mode,
        "resolved startup configuration"
    );

    let telegram = Arc::new(TelegramClient::new(&config.telegram.token));

    let handler: Arc<dyn EventHandler> = match config.bot.mode {
        BotMode::Voice => {
            let assistant = match &config.assistant.assistant_id {
                Some(id) => AssistantClient::with_base_url(
                    &config.assistant.base_url,
                    &config.assistant.api_key,
                    id,
                ),
                None => AssistantClient::create_assistant(
                    &config.assistant.base_url,
                    &config.assistant.api_key,
                    &config.assistant.name,
                    &config.assistant.model,
                    &config.assistant.instructions,
                )
                .await
                .expect("failed to create assistant; set assistant_id or check the api key"),
            };

            let bridge = VoiceCodecBridge::new(
                Arc::new(TranscriptionClient::with_base_url(
                    &config.assistant.base_url,
                    &config.assistant.api_key,
                    &config.speech.transcription_model,
                )),
                Arc::new(SynthesisClient::with_base_url(
                    &config.assistant.base_url,
                    &config.assistant.api_key,
                    &config.speech.synthesis_model,
                    &config.speech.voice,
                )),
                Arc::new(FfmpegTranscoder::new(&config.speech.ffmpeg_path)),
                WorkdirRoot::new(&config.bot.downloads_dir),
            );

            Arc::new(VoicePipeline::new(
                telegram.clone(),
                Arc::new(assistant),
                bridge,
                PollSchedule::default(),
            ))
        }
        BotMode::Pitch => Arc::new(PitchPipeline::new(
            telegram.clone(),
            Arc::new(ProfileClient::new(
                &config.pitch.profile_base_url,
                &config.pitch.profile_api_key,
            )),
            Arc::new(GenerationClient::new(
                &config.pitch.generation_base_url,
                &config.pitch.generation_api_key,
            )),
        )),
    };

    run_dispatch_loop(telegram, handler).await;
}
