//! Pipeline definition and builder

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::pipeline::errors::ValidationError;
use crate::pipeline::job::Job;
use crate::pipeline::stage::{Stage, validate_jobs};
use crate::pipeline::types::{TargetPathType, Validate};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Multi-stage pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Pipeline {
    /// Stages, in execution order
    pub stages: Vec<Stage>,
}

impl Validate for Pipeline {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.stages.is_empty() {
            return Err(ValidationError::EmptyPipeline);
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            stage.validate()?;
            if !seen.insert(stage.name.as_str()) {
                return Err(ValidationError::DuplicateName {
                    kind: "stage",
                    name: stage.name.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Pipeline {
    /// Creates a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Returns number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Looks a stage up by name
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pipeline: {} stages", self.stages.len())
    }
}

/// Builder for creating multi-stage pipelines
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stage to pipeline
    pub fn stage(mut self, stage: Stage) -> Self {
        self.pipeline.stages.push(stage);
        self
    }

    /// Adds multiple stages to pipeline
    pub fn stages(mut self, mut stages: Vec<Stage>) -> Self {
        self.pipeline.stages.append(&mut stages);
        self
    }

    /// Builds pipeline
    #[allow(clippy::missing_errors_doc)]
    pub fn build(self) -> Result<Pipeline, ValidationError> {
        self.pipeline.validate()?;
        Ok(self.pipeline)
    }

    /// Builds pipeline without validation; the serializer validates later
    #[must_use]
    pub fn build_unchecked(self) -> Pipeline {
        self.pipeline
    }
}

/// Pipeline made of jobs only, without a stage wrapper
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SingleStagePipeline {
    /// Jobs, in declaration order
    pub jobs: Vec<Job>,
}

impl SingleStagePipeline {
    /// Creates an empty single-stage pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a job
    pub fn job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }
}

impl Validate for SingleStagePipeline {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.jobs.is_empty() {
            return Err(ValidationError::NoJobs);
        }
        validate_jobs(&self.jobs)
    }
}

/// The two document shapes the provider accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PipelineBody {
    /// `stages:` at the top level
    MultiStage(Pipeline),
    /// `jobs:` at the top level
    SingleStage(SingleStagePipeline),
}

impl PipelineBody {
    /// Iterates every job, across stages for multi-stage bodies
    pub fn jobs(&self) -> Box<dyn Iterator<Item = &Job> + '_> {
        match self {
            Self::MultiStage(p) => Box::new(p.stages.iter().flat_map(|s| s.jobs.iter())),
            Self::SingleStage(p) => Box::new(p.jobs.iter()),
        }
    }

    /// Returns true for a stage-wrapped body
    pub fn is_multi_stage(&self) -> bool {
        matches!(self, Self::MultiStage(_))
    }
}

impl Validate for PipelineBody {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        match self {
            Self::MultiStage(p) => p.validate(),
            Self::SingleStage(p) => p.validate(),
        }
    }
}

impl From<Pipeline> for PipelineBody {
    fn from(pipeline: Pipeline) -> Self {
        Self::MultiStage(pipeline)
    }
}

impl From<SingleStagePipeline> for PipelineBody {
    fn from(pipeline: SingleStagePipeline) -> Self {
        Self::SingleStage(pipeline)
    }
}

/// A pipeline body together with where its YAML file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDefinition {
    /// Short name used on the command line and in reports
    pub name: String,
    /// Output file, relative to the base selected by `path_type`
    pub target_file: String,
    /// How `target_file` is resolved
    pub path_type: TargetPathType,
    /// The pipeline itself
    pub body: PipelineBody,
}

impl PipelineDefinition {
    /// Creates a definition
    pub fn new(
        name: impl Into<String>,
        target_file: impl Into<String>,
        path_type: TargetPathType,
        body: impl Into<PipelineBody>,
    ) -> Self {
        Self {
            name: name.into(),
            target_file: target_file.into(),
            path_type,
            body: body.into(),
        }
    }

    /// Resolves the file this definition is written to
    pub fn target_path(&self, repo_root: &Path, output_dir: &Path) -> PathBuf {
        self.path_type
            .resolve(&self.target_file, repo_root, output_dir)
    }
}

impl Validate for PipelineDefinition {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.is_empty() || self.target_file.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.body.validate()
    }
}

impl fmt::Display for PipelineDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.name, self.target_file, self.path_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tasks;

    fn job(name: &str) -> Job {
        Job::new(name, name).steps([tasks::checkout(), tasks::restore()])
    }

    #[test]
    fn test_builder_keeps_stage_order() {
        let pipeline = Pipeline::builder()
            .stage(Stage::new("A", "A").job(job("J1")))
            .stages(vec![
                Stage::new("B", "B").job(job("J2")),
                Stage::new("C", "C").job(job("J3")),
            ])
            .build()
            .unwrap();

        let names: Vec<_> = pipeline.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(pipeline.stage_count(), 3);
        assert!(pipeline.stage("B").is_some());
    }

    #[test]
    fn test_empty_pipeline_is_invalid() {
        assert_eq!(
            Pipeline::builder().build(),
            Err(ValidationError::EmptyPipeline)
        );
        assert_eq!(
            SingleStagePipeline::new().validate(),
            Err(ValidationError::NoJobs)
        );
    }

    #[test]
    fn test_duplicate_stage_names_are_invalid() {
        let result = Pipeline::builder()
            .stage(Stage::new("A", "A").job(job("J1")))
            .stage(Stage::new("A", "A again").job(job("J2")))
            .build();

        assert_eq!(
            result,
            Err(ValidationError::DuplicateName {
                kind: "stage",
                name: "A".to_string()
            })
        );
    }

    #[test]
    fn test_body_jobs_iterates_all_stages() {
        let body = PipelineBody::from(
            Pipeline::builder()
                .stage(Stage::new("A", "A").job(job("J1")).job(job("J2")))
                .stage(Stage::new("B", "B").job(job("J3")))
                .build_unchecked(),
        );
        let names: Vec<_> = body.jobs().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["J1", "J2", "J3"]);
        assert!(body.is_multi_stage());
    }

    #[test]
    fn test_body_shapes_serialize_to_different_roots() {
        let multi = PipelineBody::from(
            Pipeline::builder()
                .stage(Stage::new("A", "A").job(job("J1")))
                .build_unchecked(),
        );
        let single = PipelineBody::from(SingleStagePipeline::new().job(job("J1")));

        let multi = serde_yaml::to_value(&multi).unwrap();
        let single = serde_yaml::to_value(&single).unwrap();

        assert!(multi.get("stages").is_some());
        assert!(multi.get("jobs").is_none());
        assert!(single.get("jobs").is_some());
        assert!(single.get("stages").is_none());
    }

    #[test]
    fn test_definition_target_path() {
        let def = PipelineDefinition::new(
            "pr",
            "ci/pr.yml",
            TargetPathType::RelativeToRepoRoot,
            SingleStagePipeline::new().job(job("J")),
        );
        assert_eq!(
            def.target_path(Path::new("/repo"), Path::new("/repo/.azdo")),
            PathBuf::from("/repo/ci/pr.yml")
        );
        assert_eq!(def.to_string(), "pr -> ci/pr.yml (repo-root)");
        assert!(def.validate().is_ok());
    }
}
