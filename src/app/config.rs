use super::keymap::KeyConfig;
use crate::theme::PaletteType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_DATA_DIR: &str = "data";

/// Contents of `~/.config/cheatgen/config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub theme: PaletteType,
    pub auto_copy: bool,
    pub keys: KeyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            theme: PaletteType::default(),
            auto_copy: true,
            keys: KeyConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        super::persistence::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads the user config, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = ?e, "using default config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::parse(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?;
                info!(path = %path.display(), "config loaded");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Data directory by precedence: command line, config, `./data`.
    #[must_use]
    pub fn resolve_data_dir(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}
