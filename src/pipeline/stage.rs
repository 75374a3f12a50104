//! Stage types for pipeline definition
//!
//! A stage groups jobs under a name; stages run in the order they are
//! declared.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use super::Validate;
use super::errors::ValidationError;
use super::job::Job;
use super::types::validate_identifier;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A stage in a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    /// Stage identifier
    #[serde(rename = "stage")]
    pub name: String,

    /// Name shown in the run summary
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Jobs in this stage
    pub jobs: Vec<Job>,
}

impl Stage {
    /// Creates an empty stage
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            jobs: Vec::new(),
        }
    }

    /// Appends a job
    pub fn job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }
}

/// Validates a list of sibling jobs: each job on its own, then unique names.
pub(crate) fn validate_jobs(jobs: &[Job]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for job in jobs {
        job.validate()?;
        if !seen.insert(job.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                kind: "job",
                name: job.name.clone(),
            });
        }
    }
    Ok(())
}

impl Validate for Stage {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        validate_identifier(&self.name)?;

        if self.jobs.is_empty() {
            return Err(ValidationError::EmptyStage {
                stage: self.name.clone(),
            });
        }

        validate_jobs(&self.jobs)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage({}): {} jobs", self.name, self.jobs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tasks;

    fn job(name: &str) -> Job {
        Job::new(name, name).step(tasks::checkout())
    }

    #[test]
    fn test_stage_creation() {
        let stage = Stage::new("Build", "Build and Test").job(job("BuildJob"));
        assert_eq!(stage.jobs.len(), 1);
        assert_eq!(stage.to_string(), "Stage(Build): 1 jobs");
        assert!(stage.validate().is_ok());
    }

    #[test]
    fn test_stage_without_jobs_is_invalid() {
        let stage = Stage::new("Build", "Build");
        assert_eq!(
            stage.validate(),
            Err(ValidationError::EmptyStage {
                stage: "Build".to_string()
            })
        );
    }

    #[test]
    fn test_stage_with_duplicate_jobs_is_invalid() {
        let stage = Stage::new("Build", "Build").job(job("A")).job(job("A"));
        assert_eq!(
            stage.validate(),
            Err(ValidationError::DuplicateName {
                kind: "job",
                name: "A".to_string()
            })
        );
    }

    #[test]
    fn test_stage_name_rules() {
        let stage = Stage::new("Build Stage", "Build").job(job("A"));
        assert!(matches!(
            stage.validate(),
            Err(ValidationError::InvalidNameChars { .. })
        ));
    }

    #[test]
    fn test_stage_serializes_provider_keys() {
        let stage = Stage::new("Publish", "Publish Application").job(job("PublishJob"));
        let value = serde_yaml::to_value(&stage).unwrap();

        assert_eq!(value["stage"].as_str(), Some("Publish"));
        assert_eq!(value["displayName"].as_str(), Some("Publish Application"));
        assert_eq!(value["jobs"][0]["job"].as_str(), Some("PublishJob"));
    }
}
