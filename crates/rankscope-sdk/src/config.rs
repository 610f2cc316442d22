use crate::{Error, Result};
use rankscope_providers::AnnotationOptions;
use rankscope_types::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "RANKSCOPE_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. RANKSCOPE_CONFIG environment variable (with tilde expansion)
/// 3. `<config_dir>/rankscope/config.toml`
/// 4. `~/.rankscope/config.toml` (fallback for systems without a config dir)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("rankscope").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".rankscope").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no config or home directory found".to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Defaults for lookups and listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Intervals shorter than this (microseconds) are skipped over; 0 disables
    pub min_duration: Timestamp,
    /// Names that are never reported by a lookup
    pub hidden: Vec<String>,
    /// Seed for the random palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_duration: 1000,
            hidden: Vec::new(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub annotation: AnnotationOptions,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }

    pub fn annotation_options(&self) -> AnnotationOptions {
        self.annotation
    }
}
