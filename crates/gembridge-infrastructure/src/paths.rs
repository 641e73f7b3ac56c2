//! Path management for gembridge configuration files.
//!
//! ```text
//! ~/.config/gembridge/         # Config directory (platform equivalent elsewhere)
//! └── secret.json              # API keys
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "gembridge";
const SECRET_FILE_NAME: &str = "secret.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves gembridge file locations, optionally under a custom base directory.
#[derive(Debug, Clone, Default)]
pub struct GemBridgePaths {
    base_dir: Option<PathBuf>,
}

impl GemBridgePaths {
    /// `base_dir` replaces the platform config directory when given (tests, portable installs).
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the gembridge configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `secret.json`.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SECRET_FILE_NAME))
    }
}
