//! Job type: an ordered list of steps on one pool

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use super::errors::ValidationError;
use super::pool::{BuildPool, HostedPool};
use super::steps::Step;
use super::types::{Validate, validate_identifier};
use serde::Serialize;
use std::fmt;

/// A job in a pipeline
///
/// Validation requires a pool and at least one step. When the job has a
/// checkout step, no task may come before it. A job without any checkout
/// step is accepted, since the agent then checks out `self` implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    /// Job identifier
    #[serde(rename = "job")]
    pub name: String,

    /// Name shown in the run summary
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Hosted image the job runs on
    pub pool: HostedPool,

    /// Steps, in execution order
    pub steps: Vec<Step>,
}

impl Job {
    /// Creates a job on the default pool with no steps
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            pool: HostedPool::default(),
            steps: Vec::new(),
        }
    }

    /// Sets the pool
    pub fn with_pool(mut self, pool: BuildPool) -> Self {
        self.pool = pool.hosted_pool();
        self
    }

    /// Appends a step
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Appends several steps, keeping their order
    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }
}

impl Validate for Job {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        validate_identifier(&self.name)?;

        if self.pool.identifier().is_empty() {
            return Err(ValidationError::EmptyPool {
                job: self.name.clone(),
            });
        }

        if self.steps.is_empty() {
            return Err(ValidationError::EmptyJob {
                job: self.name.clone(),
            });
        }

        // Without an explicit checkout the agent checks out `self` first.
        if let Some(checkout) = self.steps.iter().position(Step::is_checkout) {
            if let Some(early) = self.steps[..checkout].iter().find(|s| !s.is_checkout()) {
                return Err(ValidationError::TaskBeforeCheckout {
                    job: self.name.clone(),
                    step: early.label().to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job({}) on {}: {} steps",
            self.name,
            self.pool,
            self.steps.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tasks;

    #[test]
    fn test_job_builder_keeps_order() {
        let job = Job::new("BuildJob", "Build")
            .with_pool(BuildPool::Windows2019)
            .step(tasks::checkout())
            .steps([tasks::restore(), tasks::build()]);

        assert_eq!(job.pool.identifier(), "windows-2019");
        assert_eq!(job.steps.len(), 3);
        assert!(job.steps[0].is_checkout());
        assert_eq!(job.to_string(), "Job(BuildJob) on windows-2019: 3 steps");
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_job_without_steps_is_invalid() {
        let job = Job::new("Empty", "Empty");
        assert_eq!(
            job.validate(),
            Err(ValidationError::EmptyJob {
                job: "Empty".to_string()
            })
        );
    }

    #[test]
    fn test_task_before_checkout_is_invalid() {
        let job = Job::new("Broken", "Broken")
            .step(tasks::restore())
            .step(tasks::checkout());

        assert_eq!(
            job.validate(),
            Err(ValidationError::TaskBeforeCheckout {
                job: "Broken".to_string(),
                step: "Restore NuGet packages".to_string(),
            })
        );
    }

    #[test]
    fn test_tasks_without_checkout_are_valid() {
        let job = Job::new("Implicit", "Implicit checkout")
            .steps([tasks::restore(), tasks::build()]);
        assert_eq!(job.validate(), Ok(()));
    }

    #[test]
    fn test_empty_pool_is_invalid() {
        let mut job = Job::new("NoPool", "No pool").step(tasks::checkout());
        job.pool = HostedPool::new("");
        assert!(matches!(
            job.validate(),
            Err(ValidationError::EmptyPool { .. })
        ));
    }

    #[test]
    fn test_job_serializes_provider_keys() {
        let job = Job::new("J", "Display").step(tasks::checkout());
        let value = serde_yaml::to_value(&job).unwrap();

        assert_eq!(value["job"].as_str(), Some("J"));
        assert_eq!(value["displayName"].as_str(), Some("Display"));
        assert_eq!(value["pool"]["vmImage"].as_str(), Some("ubuntu-latest"));
        assert_eq!(value["steps"][0]["checkout"].as_str(), Some("self"));
    }
}
