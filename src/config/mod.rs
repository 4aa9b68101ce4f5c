//! Service configuration: TOML file for tunables, environment for secrets.
//!
//! Secrets are read from the environment exactly once at startup and carried
//! in [`Secrets`]; nothing in the request path touches `std::env`.

use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3838 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// User id the fixed AI interviewer joins calls under.
    pub interviewer_id: String,
    /// Fallback user id for group-discussion agents when the request names none.
    pub default_group_agent_id: String,
    /// Name of the human participant referenced in group-discussion prompts.
    pub candidate_name: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            interviewer_id: "lucy".to_string(),
            default_group_agent_id: "default-group-bot".to_string(),
            candidate_name: "Anil Nandhan".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

/// Secrets sourced from the environment at startup.
///
/// Every field is optional so the service can still come up (and answer with
/// a configuration error) when a deployment forgot to set one.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub stream_api_key: Option<String>,
    pub stream_api_secret: Option<String>,
    pub openai_api_key: Option<String>,
    pub host_allowed_email: Option<String>,
}

/// The secret pair needed to mint call credentials.
#[derive(Debug, Clone)]
pub struct StreamSecrets {
    pub api_key: String,
    pub api_secret: String,
}

/// Everything needed to attach a realtime AI agent to a call.
#[derive(Debug, Clone)]
pub struct RealtimeSecrets {
    pub stream: StreamSecrets,
    pub openai_api_key: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SecretsError {
    #[error("Missing Stream API Key or Secret in environment variables")]
    MissingStream,
    #[error("Missing Stream/OpenAI API Key or Secret in environment variables")]
    MissingRealtime,
}

impl Secrets {
    pub const STREAM_API_KEY: &'static str = "STREAM_API_KEY";
    pub const STREAM_API_SECRET: &'static str = "STREAM_API_SECRET";
    pub const OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    pub const HOST_ALLOWED_EMAIL: &'static str = "HOST_ALLOWED_EMAIL";

    pub fn from_env() -> Self {
        Self {
            stream_api_key: read_env(Self::STREAM_API_KEY),
            stream_api_secret: read_env(Self::STREAM_API_SECRET),
            openai_api_key: read_env(Self::OPENAI_API_KEY),
            host_allowed_email: read_env(Self::HOST_ALLOWED_EMAIL),
        }
    }

    /// Secrets required by the credential issuer.
    pub fn stream(&self) -> Result<StreamSecrets, SecretsError> {
        match (&self.stream_api_key, &self.stream_api_secret) {
            (Some(key), Some(secret)) => Ok(StreamSecrets {
                api_key: key.clone(),
                api_secret: secret.clone(),
            }),
            _ => Err(SecretsError::MissingStream),
        }
    }

    /// Secrets required to attach an AI agent.
    pub fn realtime(&self) -> Result<RealtimeSecrets, SecretsError> {
        let stream = self.stream().map_err(|_| SecretsError::MissingRealtime)?;
        let openai_api_key = self
            .openai_api_key
            .clone()
            .ok_or(SecretsError::MissingRealtime)?;
        Ok(RealtimeSecrets {
            stream,
            openai_api_key,
        })
    }

    /// Log what is and is not configured. Called once at startup.
    pub fn report(&self) {
        for (name, value) in [
            (Self::STREAM_API_KEY, &self.stream_api_key),
            (Self::STREAM_API_SECRET, &self.stream_api_secret),
            (Self::OPENAI_API_KEY, &self.openai_api_key),
            (Self::HOST_ALLOWED_EMAIL, &self.host_allowed_email),
        ] {
            if value.is_some() {
                info!("{}: loaded", name);
            } else {
                tracing::warn!("{}: missing", name);
            }
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
