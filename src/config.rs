//! Bot configuration.

use crate::agent::{AgentRoster, StrategyKind};
use crate::game::{PayloadLimit, TELEGRAM_CALLBACK_LIMIT};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Bot configuration, loaded from TOML.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, Getters, Deserialize)]
pub struct BotConfig {
    /// Environment variable holding the bot token.
    #[serde(default = "default_token_env")]
    token_env: String,

    /// Bot API base URL.
    #[serde(default = "default_api_url")]
    api_url: String,

    /// Long-poll timeout in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    poll_timeout_secs: u64,

    /// Pause after a failed poll, in seconds.
    #[serde(default = "default_retry_delay_secs")]
    retry_delay_secs: u64,

    /// Largest callback payload the platform accepts.
    #[serde(default = "default_max_callback_bytes")]
    max_callback_bytes: usize,

    /// Strategy roster, in consultation order.
    #[serde(default = "StrategyKind::defaults")]
    strategies: Vec<StrategyKind>,
}

fn default_token_env() -> String {
    "TELEGRAM_BOT_TOKEN".to_string()
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_retry_delay_secs() -> u64 {
    3
}

fn default_max_callback_bytes() -> usize {
    TELEGRAM_CALLBACK_LIMIT
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
            retry_delay_secs: default_retry_delay_secs(),
            max_callback_bytes: default_max_callback_bytes(),
            strategies: StrategyKind::defaults(),
        }
    }
}

impl BotConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(strategies = ?config.strategies, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::new("strategies must not be empty".to_string()));
        }
        if self.payload_limit().max_width() == 0 {
            return Err(ConfigError::new(format!(
                "max_callback_bytes = {} cannot fit even a 1x1 board",
                self.max_callback_bytes
            )));
        }
        if self.token_env.is_empty() {
            return Err(ConfigError::new("token_env must not be empty".to_string()));
        }
        Ok(())
    }

    /// Reads the bot token from the configured environment variable.
    #[instrument(skip(self), fields(token_env = %self.token_env))]
    pub fn token(&self) -> Result<String, ConfigError> {
        std::env::var(&self.token_env).map_err(|_| {
            ConfigError::new(format!("{} environment variable not set", self.token_env))
        })
    }

    /// Payload ceiling.
    pub fn payload_limit(&self) -> PayloadLimit {
        PayloadLimit::new(self.max_callback_bytes)
    }

    /// Strategy roster in configured order.
    pub fn roster(&self) -> AgentRoster {
        AgentRoster::from_kinds(&self.strategies)
    }

    /// Long-poll timeout.
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Delay between failed polls.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
