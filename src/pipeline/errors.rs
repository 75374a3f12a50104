//! Error types for pipeline domain

use thiserror::Error;

/// Errors that can occur while rendering a pipeline definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Validation failed with specified reason
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The YAML serializer rejected the object graph
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for PipelineError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Schema violations detected before serialization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name cannot be empty
    #[error("Name cannot be empty")]
    EmptyName,

    /// Name too long
    #[error("Name too long: max {max} characters, got {len}")]
    NameTooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length of the name.
        len: usize,
    },

    /// Invalid characters in name
    #[error("Invalid characters in name: '{name}'")]
    InvalidNameChars {
        /// The invalid name.
        name: String,
    },

    /// Pipeline must have at least one stage
    #[error("Pipeline must have at least one stage")]
    EmptyPipeline,

    /// Stage must have at least one job
    #[error("Stage '{stage}' must have at least one job")]
    EmptyStage {
        /// Name of the empty stage.
        stage: String,
    },

    /// Single-stage pipeline must have at least one job
    #[error("Pipeline must have at least one job")]
    NoJobs,

    /// Job must have at least one step
    #[error("Job '{job}' must have at least one step")]
    EmptyJob {
        /// Name of the empty job.
        job: String,
    },

    /// Two siblings share a name
    #[error("Duplicate {kind} name: '{name}'")]
    DuplicateName {
        /// Either `stage` or `job`.
        kind: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A task step runs before the sources are checked out
    #[error("Job '{job}': step '{step}' runs before the checkout step")]
    TaskBeforeCheckout {
        /// Name of the offending job.
        job: String,
        /// Display name of the offending step.
        step: String,
    },

    /// Pool identifier is empty
    #[error("Job '{job}' has an empty pool identifier")]
    EmptyPool {
        /// Name of the offending job.
        job: String,
    },

    /// Pool name does not match any known hosted image
    #[error("Unknown build pool: '{0}'")]
    UnknownPool(String),
}
