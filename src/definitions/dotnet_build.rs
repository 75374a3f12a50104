//! Multi-stage .NET pipeline: build and test, then publish

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::pipeline::tasks;
use crate::pipeline::{BuildPool, Job, Pipeline, PipelineDefinition, Stage, TargetPathType};

/// Name the build definition is registered under
pub const NAME: &str = "dotnet-build";

/// Default output file
pub const DEFAULT_TARGET_FILE: &str = "dotnet-build.yml";

/// Build stage followed by a publish stage, one job each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNetBuildPipeline {
    target_file: String,
    path_type: TargetPathType,
    build_pool: BuildPool,
    publish_pool: BuildPool,
}

impl DotNetBuildPipeline {
    /// Creates the definition for the given output file
    pub fn new(target_file: impl Into<String>) -> Self {
        Self {
            target_file: target_file.into(),
            ..Self::default()
        }
    }

    /// Sets how the target file is resolved
    pub fn with_path_type(mut self, path_type: TargetPathType) -> Self {
        self.path_type = path_type;
        self
    }

    /// Sets the pool of the build stage
    pub fn with_build_pool(mut self, pool: BuildPool) -> Self {
        self.build_pool = pool;
        self
    }

    /// Sets the pool of the publish stage
    pub fn with_publish_pool(mut self, pool: BuildPool) -> Self {
        self.publish_pool = pool;
        self
    }

    /// Output file
    pub fn target_file(&self) -> &str {
        &self.target_file
    }

    /// Path resolution mode
    pub fn path_type(&self) -> TargetPathType {
        self.path_type
    }

    /// Assembles the stages
    pub fn pipeline(&self) -> Pipeline {
        let build = Stage::new("Build", "Build and Test").job(
            Job::new("BuildJob", "Build and Test .NET Application")
                .with_pool(self.build_pool)
                .steps([
                    tasks::checkout(),
                    tasks::restore(),
                    tasks::build(),
                    tasks::test(),
                ]),
        );

        let publish = Stage::new("Publish", "Publish Application").job(
            Job::new("PublishJob", "Publish .NET Application")
                .with_pool(self.publish_pool)
                .steps([
                    tasks::checkout(),
                    tasks::restore(),
                    tasks::build(),
                    tasks::publish(),
                ]),
        );

        Pipeline::builder().stage(build).stage(publish).build_unchecked()
    }

    /// Couples the pipeline with its output location
    pub fn definition(&self) -> PipelineDefinition {
        PipelineDefinition::new(NAME, &self.target_file, self.path_type, self.pipeline())
    }
}

impl Default for DotNetBuildPipeline {
    fn default() -> Self {
        Self {
            target_file: DEFAULT_TARGET_FILE.to_string(),
            path_type: TargetPathType::RelativeToOutputDir,
            build_pool: BuildPool::UbuntuLatest,
            publish_pool: BuildPool::UbuntuLatest,
        }
    }
}

impl From<DotNetBuildPipeline> for PipelineDefinition {
    fn from(pipeline: DotNetBuildPipeline) -> Self {
        pipeline.definition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{DotNetCommand, Validate};
    use pretty_assertions::assert_eq;

    fn commands(job: &Job) -> Vec<Option<DotNetCommand>> {
        job.steps.iter().map(crate::pipeline::Step::command).collect()
    }

    #[test]
    fn test_two_stages_one_job_each() {
        let pipeline = DotNetBuildPipeline::default().pipeline();

        let names: Vec<_> = pipeline.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Build", "Publish"]);
        assert!(pipeline.stages.iter().all(|s| s.jobs.len() == 1));
        assert!(pipeline.validate().is_ok());
    }

    #[test]
    fn test_build_job_step_order() {
        let pipeline = DotNetBuildPipeline::default().pipeline();
        let job = &pipeline.stages[0].jobs[0];

        assert_eq!(job.name, "BuildJob");
        assert!(job.steps[0].is_checkout());
        assert_eq!(
            commands(job),
            [
                None,
                Some(DotNetCommand::Restore),
                Some(DotNetCommand::Build),
                Some(DotNetCommand::Test),
            ]
        );
    }

    #[test]
    fn test_publish_job_step_order() {
        let pipeline = DotNetBuildPipeline::default().pipeline();
        let job = &pipeline.stages[1].jobs[0];

        assert_eq!(job.name, "PublishJob");
        assert_eq!(
            commands(job),
            [
                None,
                Some(DotNetCommand::Restore),
                Some(DotNetCommand::Build),
                Some(DotNetCommand::Publish),
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let def = DotNetBuildPipeline::default().definition();
        assert_eq!(def.name, NAME);
        assert_eq!(def.target_file, "dotnet-build.yml");
        assert_eq!(def.path_type, TargetPathType::RelativeToOutputDir);
        assert!(def.body.jobs().all(|j| j.pool.identifier() == "ubuntu-latest"));
    }

    #[test]
    fn test_custom_pools_and_target() {
        let def: PipelineDefinition = DotNetBuildPipeline::new("azure-pipelines.yml")
            .with_build_pool(BuildPool::Windows2022)
            .with_publish_pool(BuildPool::MacOS12)
            .with_path_type(TargetPathType::RelativeToRepoRoot)
            .into();

        let pools: Vec<_> = def.body.jobs().map(|j| j.pool.identifier()).collect();
        assert_eq!(pools, ["windows-2022", "macos-12"]);
        assert_eq!(def.target_file, "azure-pipelines.yml");
        assert_eq!(def.path_type, TargetPathType::RelativeToRepoRoot);
    }
}
