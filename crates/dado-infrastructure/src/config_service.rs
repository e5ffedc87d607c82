//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/dado/config.toml` or an
//! explicitly given file.

use std::fs;
use std::path::{Path, PathBuf};

use dado_core::DiceError;
use dado_core::config::RootConfig;
use dado_core::error::Result;

use crate::paths::DadoPaths;

#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// `None` means the platform default location.
    path: Option<PathBuf>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => DadoPaths::config_file().map_err(|e| DiceError::config(e.to_string())),
        }
    }

    /// Reads and validates the configuration.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// parsed or fails validation is an error: silently ignoring a broken
    /// config would roll the wrong dice.
    pub fn load(&self) -> Result<RootConfig> {
        let path = self.config_path()?;

        if !path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(RootConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = RootConfig::from_toml_str(&content).map_err(|e| match e {
            DiceError::Serialization { message, .. } => {
                DiceError::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        tracing::info!(
            "[ConfigService] Loaded {} dice from {:?}",
            config.dice.len(),
            path
        );
        Ok(config)
    }

    /// Where the history lives for `config`.
    ///
    /// A relative `history_file` is taken relative to the config file's
    /// directory.
    pub fn history_path(&self, config: &RootConfig) -> Result<PathBuf> {
        match &config.history_file {
            Some(file) if file.is_absolute() => Ok(file.clone()),
            Some(file) => {
                let config_path = self.config_path()?;
                let base = config_path.parent().unwrap_or(Path::new("."));
                Ok(base.join(file))
            }
            None => DadoPaths::history_file().map_err(|e| DiceError::config(e.to_string())),
        }
    }
}
