//! Configuration loading
//!
//! A repository may carry a `phantom.config.json` at its root. The file is
//! optional: a missing file is the common case, and a broken one is reported
//! as a warning by [`crate::context::PhantomContext::build`] instead of
//! stopping the command.

mod project;

use std::path::{Path, PathBuf};

pub use project::{PhantomConfig, PostCreateConfig, PreDeleteConfig};

/// Well-known configuration filename, looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = "phantom.config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration file at the repository root (expected, silent)
    #[error("{CONFIG_FILE_NAME} not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// File exists but could not be read or is not valid JSON
    #[error("Failed to parse {CONFIG_FILE_NAME}: {message}")]
    Parse { message: String },

    /// Valid JSON with the wrong shape
    #[error("Invalid {CONFIG_FILE_NAME}: {message}")]
    Validation { message: String },
}

/// Path of the configuration file for a repository.
pub fn config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CONFIG_FILE_NAME)
}

/// Load and validate `phantom.config.json` from the repository root.
pub fn load_config(repo_root: &Path) -> Result<PhantomConfig, ConfigError> {
    let path = config_path(repo_root);

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound { path });
        }
        Err(e) => {
            return Err(ConfigError::Parse {
                message: format!("could not read {}: {e}", path.display()),
            });
        }
    };

    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

    let config =
        PhantomConfig::from_value(value).map_err(|message| ConfigError::Validation { message })?;
    log::debug!("Loaded {}", path.display());
    Ok(config)
}
