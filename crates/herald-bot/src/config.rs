//! Bot configuration loading from file and environment variables.
//!
//! Every field has a default, so a missing config file yields a runnable
//! (if keyless) configuration; secrets can always be supplied through the
//! environment instead of the file.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Top-level bot configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Which bot this process runs and where it keeps working files.
    #[serde(default)]
    pub bot: BotConfig,

    /// Chat transport credentials.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Conversational-assistant provider settings.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Transcription / synthesis / transcoding settings.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Profile-data and text-generation provider settings.
    #[serde(default)]
    pub pitch: PitchConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which front end the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotMode {
    /// Voice assistant bot.
    #[default]
    Voice,
    /// Company-pitch bot.
    Pitch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub mode: BotMode,

    /// Root of the per-user audio working directories.
    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: String,
}

#[derive(Clone, Default, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Overridable via `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub token: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Provider API key. Overridable via `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Existing assistant to use; when unset, one is created at startup.
    #[serde(default)]
    pub assistant_id: Option<String>,

    #[serde(default = "default_assistant_name")]
    pub name: String,

    #[serde(default = "default_assistant_model")]
    pub model: String,

    #[serde(default = "default_assistant_instructions")]
    pub instructions: String,
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("assistant_id", &self.assistant_id)
            .field("name", &self.name)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    #[serde(default = "default_synthesis_model")]
    pub synthesis_model: String,

    /// Voice profile passed to the synthesis provider.
    #[serde(default = "default_voice")]
    pub voice: String,

    /// ffmpeg binary used for container conversion.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

#[derive(Clone, Deserialize)]
pub struct PitchConfig {
    #[serde(default = "default_profile_base_url")]
    pub profile_base_url: String,

    /// Profile provider key. Overridable via `PROFILE_API_KEY`.
    #[serde(default)]
    pub profile_api_key: String,

    #[serde(default = "default_generation_base_url")]
    pub generation_base_url: String,

    /// Generation provider key. Overridable via `GENERATION_API_KEY`.
    #[serde(default)]
    pub generation_api_key: String,
}

impl fmt::Debug for PitchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PitchConfig")
            .field("profile_base_url", &self.profile_base_url)
            .field("profile_api_key", &"[REDACTED]")
            .field("generation_base_url", &self.generation_base_url)
            .field("generation_api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "herald_bot=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_downloads_dir() -> String {
    "./downloads".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_assistant_name() -> String {
    "herald-voice-assistant".to_string()
}

fn default_assistant_model() -> String {
    "gpt-4".to_string()
}

fn default_assistant_instructions() -> String {
    "You are a friendly voice assistant. Keep replies short and conversational.".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_synthesis_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_profile_base_url() -> String {
    "https://nubela.co/proxycurl".to_string()
}

fn default_generation_base_url() -> String {
    "https://api.cohere.ai/v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            mode: BotMode::default(),
            downloads_dir: default_downloads_dir(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            api_key: String::new(),
            assistant_id: None,
            name: default_assistant_name(),
            model: default_assistant_model(),
            instructions: default_assistant_instructions(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            transcription_model: default_transcription_model(),
            synthesis_model: default_synthesis_model(),
            voice: default_voice(),
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            profile_base_url: default_profile_base_url(),
            profile_api_key: String::new(),
            generation_base_url: default_generation_base_url(),
            generation_api_key: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults when no
/// file exists, then applies environment overrides for secrets.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) if std::path::Path::new(path).exists() => {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)?
        }
        _ => Config::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
        config.telegram.token = token;
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        config.assistant.api_key = key;
    }
    if let Ok(key) = std::env::var("PROFILE_API_KEY") {
        config.pitch.profile_api_key = key;
    }
    if let Ok(key) = std::env::var("GENERATION_API_KEY") {
        config.pitch.generation_api_key = key;
    }
}
