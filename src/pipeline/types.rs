//! Core types for pipeline domain
//!
//! This module contains the small shared pieces used across the
//! pipeline model: the `Validate` seam, name rules and the
//! target-path resolution mode of a definition.

#![allow(clippy::must_use_candidate)]

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum length of a stage or job name
pub const MAX_NAME_LEN: usize = 100;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Trait for types that can be validated
#[allow(clippy::missing_errors_doc)]
pub trait Validate {
    /// Type of validation error
    type Error;

    /// Validates this type
    fn validate(&self) -> std::result::Result<(), Self::Error>;
}

/// Checks a stage or job name against the provider's identifier rules.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`], [`ValidationError::NameTooLong`]
/// or [`ValidationError::InvalidNameChars`].
pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LEN,
            len: name.len(),
        });
    }

    if !IDENTIFIER.is_match(name) {
        return Err(ValidationError::InvalidNameChars {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// How a definition's target file is resolved to a path on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetPathType {
    /// Relative to the generator's output directory (`.azdo` by default)
    #[default]
    RelativeToOutputDir,
    /// Relative to the repository root
    RelativeToRepoRoot,
}

impl TargetPathType {
    /// Joins `target_file` onto the base directory this mode selects.
    pub fn resolve(self, target_file: &str, repo_root: &Path, output_dir: &Path) -> PathBuf {
        match self {
            Self::RelativeToOutputDir => output_dir.join(target_file),
            Self::RelativeToRepoRoot => repo_root.join(target_file),
        }
    }
}

impl fmt::Display for TargetPathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelativeToOutputDir => write!(f, "output-dir"),
            Self::RelativeToRepoRoot => write!(f, "repo-root"),
        }
    }
}
