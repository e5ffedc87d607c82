//! Path management for dado's configuration, history and logs.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/dado/              # Config directory (dirs::config_dir)
//! ├── config.toml              # Dice, assets and limits
//! └── logs/                    # Application logs
//!     └── dado.log.YYYY-MM-DD
//!
//! ~/.local/share/dado/         # Data directory (dirs::data_dir)
//! └── history.json             # Roll history
//! ```
//!
//! The exact roots are platform specific (`~/Library/Application Support`
//! on macOS, `%APPDATA%` on Windows).

use std::path::PathBuf;

const APP_DIR: &str = "dado";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither a config nor a data directory could be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct DadoPaths;

impl DadoPaths {
    /// `~/.config/dado` on Linux.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// `~/.local/share/dado` on Linux.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("history.json"))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
