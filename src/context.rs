//! Per-invocation context shared by every lifecycle operation.

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, PhantomConfig, load_config};
use crate::path::{resolve_worktree_path, resolve_worktrees_directory};

/// Prefix of every configuration warning surfaced to the user.
pub const CONFIG_WARNING_PREFIX: &str = "Configuration warning:";

/// Repository root, its configuration, and where its worktrees live.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PhantomContext {
    pub repo_root: PathBuf,
    pub config: PhantomConfig,
    pub worktrees_directory: PathBuf,
}

impl PhantomContext {
    /// Load configuration for `repo_root` and resolve the worktrees directory.
    ///
    /// Never fails. A missing configuration file yields an empty configuration
    /// silently; a broken one yields an empty configuration plus a single
    /// warning starting with [`CONFIG_WARNING_PREFIX`].
    pub fn build(repo_root: impl Into<PathBuf>) -> (Self, Vec<String>) {
        let repo_root = repo_root.into();
        let mut warnings = Vec::new();

        let config = match load_config(&repo_root) {
            Ok(config) => config,
            Err(ConfigError::NotFound { .. }) => PhantomConfig::default(),
            Err(e) => {
                log::debug!("Ignoring configuration: {e}");
                warnings.push(format!("{CONFIG_WARNING_PREFIX} {e}"));
                PhantomConfig::default()
            }
        };

        (Self::with_config(repo_root, config), warnings)
    }

    /// Context from an already-loaded configuration.
    pub fn with_config(repo_root: impl Into<PathBuf>, config: PhantomConfig) -> Self {
        let repo_root = repo_root.into();
        let worktrees_directory =
            resolve_worktrees_directory(&repo_root, config.worktrees_directory.as_deref());
        Self {
            repo_root,
            config,
            worktrees_directory,
        }
    }

    pub fn worktree_path(&self, name: &str) -> PathBuf {
        resolve_worktree_path(&self.worktrees_directory, name)
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }
}
