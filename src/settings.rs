//! Provider settings storage.
//!
//! A single JSON file under the user config directory holds the chosen
//! provider, API key, and optional model override. File IO is wrapped in
//! a timeout because a hung network filesystem must surface as an error,
//! never freeze collection.
//!
//! Environment variables override the file (`TUBEDIGEST_PROVIDER`,
//! `TUBEDIGEST_API_KEY`, `TUBEDIGEST_MODEL`), which is how the CLI runs
//! without any prior setup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DigestError, DigestResult};
use crate::summarize::{
    ClaudeSummarizer, GeminiSummarizer, OpenAiSummarizer, Provider, ProviderKind,
};

const SETTINGS_DIR: &str = "tubedigest";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub provider: ProviderKind,
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Settings {
    /// Default on-disk location, e.g. `~/.config/tubedigest/settings.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Load settings: environment first, then the settings file.
    pub async fn load(io_timeout: Duration) -> DigestResult<Self> {
        if let Some(settings) = Self::from_env() {
            debug!("settings loaded from environment");
            return Ok(settings);
        }
        let path = Self::default_path()
            .ok_or_else(|| DigestError::Validation("no user config directory".to_string()))?;
        Self::load_from(path, io_timeout).await
    }

    fn from_env() -> Option<Self> {
        let api_key = std::env::var("TUBEDIGEST_API_KEY").ok()?;
        let provider = match std::env::var("TUBEDIGEST_PROVIDER")
            .unwrap_or_else(|_| "claude".to_string())
            .to_lowercase()
            .as_str()
        {
            "openai" => ProviderKind::OpenAi,
            "gemini" => ProviderKind::Gemini,
            _ => ProviderKind::Claude,
        };
        Some(Self {
            provider,
            api_key,
            model: std::env::var("TUBEDIGEST_MODEL").ok(),
        })
    }

    /// Read settings from a specific file, bounded by `io_timeout`.
    pub async fn load_from(path: PathBuf, io_timeout: Duration) -> DigestResult<Self> {
        let read = tokio::fs::read_to_string(&path);
        let raw = tokio::time::timeout(io_timeout, read)
            .await
            .map_err(|_| DigestError::Timeout(io_timeout))?
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("settings file {} is not valid JSON", path.display()))?;
        Ok(settings)
    }

    /// Write settings to a specific file, bounded by `io_timeout`.
    pub async fn store_to(&self, path: PathBuf, io_timeout: Duration) -> DigestResult<()> {
        let payload = serde_json::to_string_pretty(self).context("settings not serializable")?;
        let write = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, payload).await
        };
        tokio::time::timeout(io_timeout, write)
            .await
            .map_err(|_| DigestError::Timeout(io_timeout))?
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Build the configured provider client.
    #[must_use]
    pub fn into_provider(self) -> Provider {
        match self.provider {
            ProviderKind::Claude => Provider::Claude(ClaudeSummarizer::new(self.api_key, self.model)),
            ProviderKind::OpenAi => Provider::OpenAi(OpenAiSummarizer::new(self.api_key, self.model)),
            ProviderKind::Gemini => Provider::Gemini(GeminiSummarizer::new(self.api_key, self.model)),
        }
    }
}
