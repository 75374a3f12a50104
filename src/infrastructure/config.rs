//! Configuration management

use crate::definitions::PoolSettings;
use crate::pipeline::BuildPool;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the repository root when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "azpipe.yaml";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`Config`]
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output directory, relative to the repository root
    pub output_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Prepend the generated-file header
    pub include_header: bool,
    /// Pool of the build stage
    #[serde(deserialize_with = "BuildPool::deserialize_lenient")]
    pub build_pool: BuildPool,
    /// Pool of the publish stage
    #[serde(deserialize_with = "BuildPool::deserialize_lenient")]
    pub publish_pool: BuildPool,
    /// Pool of the PR validation job
    #[serde(deserialize_with = "BuildPool::deserialize_lenient")]
    pub pr_pool: BuildPool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(".azdo"),
            log_level: "info".to_string(),
            include_header: true,
            build_pool: BuildPool::UbuntuLatest,
            publish_pool: BuildPool::UbuntuLatest,
            pr_pool: BuildPool::UbuntuLatest,
        }
    }
}

impl Config {
    /// Parses configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the text does not describe a [`Config`].
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Loads configuration from a file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads an explicit config file, or `azpipe.yaml` in `repo_root` when it
    /// exists, or the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a selected file cannot be read or parsed.
    pub fn discover(explicit: Option<&Path>, repo_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = repo_root.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Pools for the built-in definitions
    #[must_use]
    pub fn pools(&self) -> PoolSettings {
        PoolSettings {
            build: self.build_pool,
            publish: self.publish_pool,
            pr: self.pr_pool,
        }
    }
}
