//! Configuration for the CLI

use anyhow::{Context, Result};
use pcore::General;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the configured credential.
pub const CREDENTIAL_ENV: &str = "PARLEY_CREDENTIAL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// The conversation settings
    #[serde(default)]
    pub general: General,

    /// Where and how to connect
    #[serde(default)]
    pub endpoint: Endpoint,
}

/// Connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Endpoint {
    /// The chat completion URL
    pub chat: String,

    /// The OAuth token URL; without it the credential is used as the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth: Option<String>,

    /// The OAuth scope
    pub scope: String,

    /// The authorization key or pre-issued token
    pub credential: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            chat: model::CHAT_ENDPOINT.into(),
            oauth: Some(model::OAUTH_ENDPOINT.into()),
            scope: model::OAUTH_SCOPE.into(),
            credential: "YOUR_AUTHORIZATION_KEY".into(),
        }
    }
}

impl Config {
    /// The configuration file path
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not resolve the home directory")?;
        Ok(home.join(".config/parley.toml"))
    }

    /// Load the configuration from the file
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        let text = std::fs::read_to_string(&path).with_context(|| {
            format!("failed to read {}, run `parley generate`", path.display())
        })?;
        let mut config: Self = toml::from_str(&text)?;
        if let Ok(credential) = std::env::var(CREDENTIAL_ENV) {
            config.endpoint.credential = credential;
        }
        Ok(config)
    }

    /// Save the configuration to the file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string(self)?)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }
}
