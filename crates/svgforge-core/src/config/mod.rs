use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{endpoints, env, models, storage};
use crate::error::ForgeError;

/// On-disk settings (`~/.config/svgforge/config.toml`). Every field is
/// optional; unset values fall through to the environment or built-in
/// defaults during [`Settings::resolve_api`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub data_dir: Option<PathBuf>,
}

/// Fully resolved endpoint configuration, fixed for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
}

/// One place a configuration value may come from, in lookup order.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource<'a> {
    Env(&'a str),
    File(Option<&'a str>),
    Default(&'a str),
}

impl ConfigSource<'_> {
    fn lookup(&self, env_lookup: &dyn Fn(&str) -> Option<String>) -> Option<String> {
        match self {
            ConfigSource::Env(name) => env_lookup(name).filter(|v| !v.is_empty()),
            ConfigSource::File(value) => value.filter(|v| !v.is_empty()).map(str::to_string),
            ConfigSource::Default(value) => Some((*value).to_string()),
        }
    }
}

/// First source that yields a value; the trailing `Default` always does.
pub fn resolve(sources: &[ConfigSource<'_>], env_lookup: &dyn Fn(&str) -> Option<String>) -> String {
    sources
        .iter()
        .find_map(|source| source.lookup(env_lookup))
        .unwrap_or_default()
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(storage::CONFIG_DIR_NAME)
            .join(storage::CONFIG_FILE_NAME)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`; a missing or unparsable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(path = %path.display(), "ignoring invalid config: {e}"),
                },
                Err(e) => tracing::warn!(path = %path.display(), "could not read config: {e}"),
            }
        }
        Self::default()
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ForgeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ForgeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding the persisted conversation list.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(storage::DATA_DIR_NAME)
        })
    }

    /// Resolve against the process environment.
    pub fn resolve_api(&self) -> ApiConfig {
        self.resolve_api_with(&|name| std::env::var(name).ok())
    }

    /// Resolve each value through: explicit env override, generic env
    /// override, config file, built-in default.
    pub fn resolve_api_with(&self, env_lookup: &dyn Fn(&str) -> Option<String>) -> ApiConfig {
        let api_key = resolve(
            &[
                ConfigSource::Env(env::API_KEY),
                ConfigSource::Env(env::GENERIC_API_KEY),
                ConfigSource::File(self.api.api_key.as_deref()),
                ConfigSource::Default(""),
            ],
            env_lookup,
        );
        let base_url = resolve(
            &[
                ConfigSource::Env(env::BASE_URL),
                ConfigSource::Env(env::GENERIC_BASE_URL),
                ConfigSource::File(self.api.base_url.as_deref()),
                ConfigSource::Default(endpoints::DEFAULT_BASE_URL),
            ],
            env_lookup,
        );
        let model = resolve(
            &[
                ConfigSource::Env(env::MODEL),
                ConfigSource::Env(env::GENERIC_MODEL),
                ConfigSource::File(self.api.model.as_deref()),
                ConfigSource::Default(models::DEFAULT_MODEL),
            ],
            env_lookup,
        );

        if api_key.is_empty() {
            tracing::warn!("no API key configured; requests will be sent without credentials");
        }

        ApiConfig {
            base_url,
            api_key,
            model,
            temperature: self.api.temperature.or(Some(models::DEFAULT_TEMPERATURE)),
        }
    }
}
