//! Configuration for the assistant
//!
//! Defaults reproduce the demo timings. A TOML file may override any field.

use crate::responder::GREETING;
use crate::{AssistantError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "HIVE_ASSISTANT_CONFIG";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Simulated round trip between a user message and its reply
    pub reply_latency_ms: u64,

    /// How long a voice capture session runs before yielding a transcript
    pub listen_duration_ms: u64,

    /// Pause between receiving voice input and submitting it
    pub auto_submit_delay_ms: u64,

    /// What the simulated recognizer hears
    pub simulated_transcript: String,

    /// First assistant message of every session
    pub greeting: String,

    /// Capacity of the event channel
    pub event_queue_size: usize,

    /// Whether the host offers speech synthesis
    pub enable_speech_output: bool,

    /// Whether the host offers speech recognition
    pub enable_speech_input: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_latency_ms: 1000,
            listen_duration_ms: 2000,
            auto_submit_delay_ms: 500,
            simulated_transcript: "Show me iPhone listings".to_string(),
            greeting: GREETING.to_string(),
            event_queue_size: 256,
            enable_speech_output: true,
            enable_speech_input: true,
        }
    }
}

impl AssistantConfig {
    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AssistantError::IOError(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            AssistantError::ConfigError(msg) => {
                AssistantError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AssistantConfig =
            toml::from_str(content).map_err(|e| AssistantError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config the binary should use: the file named by
    /// `HIVE_ASSISTANT_CONFIG`, then the per-user config file, then defaults.
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load(path);
        }

        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/hive-assistant/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hive-assistant").join("config.toml"))
    }

    pub fn with_reply_latency(mut self, latency: Duration) -> Self {
        self.reply_latency_ms = latency.as_millis() as u64;
        self
    }

    pub fn with_listen_duration(mut self, duration: Duration) -> Self {
        self.listen_duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.simulated_transcript = transcript.into();
        self
    }

    /// Disable speech output (text-only mode)
    pub fn without_speech_output(mut self) -> Self {
        self.enable_speech_output = false;
        self
    }

    /// Disable speech input
    pub fn without_speech_input(mut self) -> Self {
        self.enable_speech_input = false;
        self
    }

    pub fn reply_latency(&self) -> Duration {
        Duration::from_millis(self.reply_latency_ms)
    }

    pub fn listen_duration(&self) -> Duration {
        Duration::from_millis(self.listen_duration_ms)
    }

    pub fn auto_submit_delay(&self) -> Duration {
        Duration::from_millis(self.auto_submit_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_queue_size == 0 {
            return Err(AssistantError::ConfigError(
                "event_queue_size must be at least 1".to_string(),
            ));
        }

        if self.simulated_transcript.trim().is_empty() {
            return Err(AssistantError::ConfigError(
                "simulated_transcript must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
