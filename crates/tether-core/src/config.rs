use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tether_provider::{ClientSettings, ENV_API_KEY, ENV_BASE_URL, ENV_PROJECT, ENV_TEMPLATE};
use tracing::debug;

/// Default agent for glue code such as the CLI.
pub const ENV_AGENT_ID: &str = "TETHER_AGENT_ID";

/// Serialized settings from ~/.tether/config.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the cloud endpoint when set.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub project: Option<String>,
    pub template: Option<String>,
    pub agent_id: Option<String>,
}

impl Config {
    /// Client settings described by this config, before environment overrides.
    pub fn client_settings(&self) -> ClientSettings {
        let mut settings = match &self.base_url {
            Some(url) => ClientSettings::cloud().with_base_url(url.clone()),
            None => ClientSettings::cloud(),
        };
        settings.token = self.api_key.clone();
        settings.project = self.project.clone();
        settings.template = self.template.clone();
        settings
    }
}

/// Helper struct for storing the location to read/write global settings
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".tether");
        path.push("config.json");
        Self { path }
    }

    /// Store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the user's saved config, or fallback to Default
    pub fn load(&self) -> Config {
        if let Ok(content) = fs::read_to_string(&self.path) {
            match serde_json::from_str(&content) {
                Ok(config) => return config,
                Err(e) => debug!(path = %self.path.display(), "ignoring unreadable config: {e}"),
            }
        }
        Config::default()
    }

    /// Save the user's config back to disk
    pub fn save(&self, config: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
    }

    /// Export configured values as `TETHER_*` variables, never overwriting the process env
    pub fn hydrate_env(&self) {
        let config = self.load();
        let pairs = [
            (ENV_BASE_URL, &config.base_url),
            (ENV_API_KEY, &config.api_key),
            (ENV_PROJECT, &config.project),
            (ENV_TEMPLATE, &config.template),
            (ENV_AGENT_ID, &config.agent_id),
        ];
        for (env_var, value) in pairs {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                if std::env::var(env_var).is_err() {
                    std::env::set_var(env_var, value);
                }
            }
        }
    }
}
