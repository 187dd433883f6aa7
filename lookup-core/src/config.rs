use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, hash_map::Entry},
    fs,
    path::PathBuf,
};
use tracing::warn;

use crate::{provider::ProviderId, view::StalePolicy};

/// Configuration for a single provider (credential and optional endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Overrides the provider's public endpoint, e.g. for a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// What happens to a shown report/photo when a later lookup fails.
    #[serde(default)]
    pub stale: StalePolicy,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    #[serde(default)]
    pub view: ViewConfig,
}

impl Config {
    /// Load config from disk and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env();
        Ok(cfg)
    }

    /// Load config from disk only, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "city-lookup", "lookup-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override credentials from `OPENWEATHER_API_KEY` / `UNSPLASH_ACCESS_KEY`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for id in ProviderId::all() {
            let Some(key) = lookup(id.env_var()).filter(|k| !k.is_empty()) else {
                continue;
            };

            self.upsert_provider_api_key(*id, key);
        }
    }

    /// Set/replace a provider API key, keeping any configured endpoint.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        match self.providers.entry(provider_id.as_str().to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().api_key = api_key,
            Entry::Vacant(entry) => {
                entry.insert(ProviderConfig {
                    api_key,
                    base_url: None,
                });
            }
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers
            .get(provider_id.as_str())
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn provider_base_url(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers
            .get(provider_id.as_str())
            .and_then(|cfg| cfg.base_url.as_deref())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }

    /// Credential to send to the provider. Missing keys are sent empty and
    /// left for the provider to reject.
    pub fn credential(&self, provider_id: ProviderId) -> String {
        match self.provider_api_key(provider_id) {
            Some(key) => key.to_owned(),
            None => {
                warn!(
                    provider = %provider_id,
                    "no API key configured; run `lookup configure {provider_id}` or set {}",
                    provider_id.env_var()
                );
                String::new()
            }
        }
    }
}
