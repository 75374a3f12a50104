//! Generation run: serialize each definition and write it to disk
//!
//! Every definition is handled on its own. A schema or IO failure is
//! recorded in the report and the run moves on; only failing to create the
//! base output directory aborts the run.

use crate::infrastructure::{AzurePipelinesSerializer, SerializerOptions};
use crate::pipeline::{PipelineDefinition, PipelineError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors that stop a generation run
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The base output directory could not be created
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Settings of a generation run
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Repository root; repo-relative targets are resolved against it
    pub repo_root: PathBuf,
    /// Output directory, relative to `repo_root` unless absolute
    pub output_dir: PathBuf,
    /// Serialize only, write nothing
    pub dry_run: bool,
    /// Serializer options
    pub serializer: SerializerOptions,
}

impl GeneratorSettings {
    /// Settings rooted at `repo_root` with the default `.azdo` output directory
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            output_dir: PathBuf::from(".azdo"),
            dry_run: false,
            serializer: SerializerOptions::default(),
        }
    }

    /// Absolute (or repo-joined) output directory
    #[must_use]
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.repo_root.join(&self.output_dir)
    }
}

/// Result of one definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// The file was written (or would have been, on a dry run)
    Generated {
        /// Target path.
        path: PathBuf,
        /// Size of the YAML text.
        bytes: usize,
    },
    /// Serialization or writing failed
    Failed {
        /// Target path, if it could be resolved.
        path: PathBuf,
        /// Human-readable reason.
        error: String,
    },
}

/// Outcome of one definition, with its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionReport {
    /// Definition name
    pub name: String,
    /// What happened
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Summary of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Base output directory
    pub output_dir: PathBuf,
    /// Whether anything was written
    pub dry_run: bool,
    /// Per-definition outcomes, in processing order
    pub definitions: Vec<DefinitionReport>,
}

impl GenerationReport {
    /// Definitions that produced a file
    pub fn generated(&self) -> impl Iterator<Item = &DefinitionReport> {
        self.definitions
            .iter()
            .filter(|d| matches!(d.outcome, Outcome::Generated { .. }))
    }

    /// Definitions that failed
    pub fn failed(&self) -> impl Iterator<Item = &DefinitionReport> {
        self.definitions
            .iter()
            .filter(|d| matches!(d.outcome, Outcome::Failed { .. }))
    }

    /// True when no definition failed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Runs serialization and file output for a set of definitions
#[derive(Debug, Clone)]
pub struct Generator {
    settings: GeneratorSettings,
    serializer: AzurePipelinesSerializer,
}

impl Generator {
    /// Creates a generator
    #[must_use]
    pub fn new(settings: GeneratorSettings) -> Self {
        let serializer = AzurePipelinesSerializer::new(settings.serializer.clone());
        Self {
            settings,
            serializer,
        }
    }

    /// Settings in use
    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Renders a single definition without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's [`PipelineError`].
    pub fn render(&self, definition: &PipelineDefinition) -> Result<String, PipelineError> {
        self.serializer.serialize(definition)
    }

    /// Generates every definition in order.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::OutputDir`] if the base output directory
    /// cannot be created. Per-definition failures are reported in the
    /// returned [`GenerationReport`] instead.
    pub fn run(
        &self,
        definitions: &[PipelineDefinition],
    ) -> Result<GenerationReport, GeneratorError> {
        let output_dir = self.settings.resolved_output_dir();

        if !self.settings.dry_run && !output_dir.is_dir() {
            fs::create_dir_all(&output_dir).map_err(|source| GeneratorError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;
            tracing::info!(path = %output_dir.display(), "Created output directory");
        }

        let mut report = GenerationReport {
            output_dir: output_dir.clone(),
            dry_run: self.settings.dry_run,
            definitions: Vec::with_capacity(definitions.len()),
        };

        for definition in definitions {
            let path = definition.target_path(&self.settings.repo_root, &output_dir);
            tracing::debug!(definition = %definition.name, path = %path.display(), "Processing");

            let outcome = match self.generate_one(definition, &path) {
                Ok(bytes) => {
                    tracing::info!(
                        definition = %definition.name,
                        path = %path.display(),
                        bytes,
                        "Generated"
                    );
                    Outcome::Generated { path, bytes }
                }
                Err(err) => {
                    tracing::error!(definition = %definition.name, error = %err, "Generation failed");
                    Outcome::Failed {
                        path,
                        error: err.to_string(),
                    }
                }
            };

            report.definitions.push(DefinitionReport {
                name: definition.name.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    fn generate_one(
        &self,
        definition: &PipelineDefinition,
        path: &Path,
    ) -> Result<usize, PipelineError> {
        let yaml = self.serializer.serialize(definition)?;

        if self.settings.dry_run {
            return Ok(yaml.len());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &yaml)?;

        Ok(yaml.len())
    }
}
