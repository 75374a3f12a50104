//! Single-stage pull request validation pipeline

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use crate::pipeline::tasks;
use crate::pipeline::{BuildPool, Job, PipelineDefinition, SingleStagePipeline, TargetPathType};

/// Name the PR definition is registered under
pub const NAME: &str = "dotnet-pr";

/// Default output file name
pub const DEFAULT_FILE_NAME: &str = "dotnet-pr.yml";

/// Default folder, relative to the repository root
pub const DEFAULT_FOLDER: &str = ".azdo";

/// Restore, build and test on every pull request; never publishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNetPrPipeline {
    target_file: String,
    path_type: TargetPathType,
    pool: BuildPool,
}

impl DotNetPrPipeline {
    /// Creates the definition writing `<folder>/<file_name>`
    pub fn new(file_name: &str, folder: &str) -> Self {
        Self {
            target_file: format!("{folder}/{file_name}"),
            path_type: TargetPathType::RelativeToRepoRoot,
            pool: BuildPool::default(),
        }
    }

    /// Creates the definition writing `file_name` into the generator's
    /// output directory
    pub fn in_output_dir(file_name: &str) -> Self {
        Self {
            target_file: file_name.to_string(),
            path_type: TargetPathType::RelativeToOutputDir,
            pool: BuildPool::default(),
        }
    }

    /// Sets the pool of the validation job
    pub fn with_pool(mut self, pool: BuildPool) -> Self {
        self.pool = pool;
        self
    }

    /// Output file, resolved per [`DotNetPrPipeline::path_type`]
    pub fn target_file(&self) -> &str {
        &self.target_file
    }

    /// How the target file is resolved
    pub fn path_type(&self) -> TargetPathType {
        self.path_type
    }

    /// Assembles the job
    pub fn pipeline(&self) -> SingleStagePipeline {
        SingleStagePipeline::new().job(
            Job::new("PRValidation", "Pull Request Validation")
                .with_pool(self.pool)
                .steps([
                    tasks::checkout(),
                    tasks::restore(),
                    tasks::build(),
                    tasks::test(),
                ]),
        )
    }

    /// Couples the pipeline with its output location
    pub fn definition(&self) -> PipelineDefinition {
        PipelineDefinition::new(
            NAME,
            &self.target_file,
            self.path_type,
            self.pipeline(),
        )
    }
}

impl Default for DotNetPrPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME, DEFAULT_FOLDER)
    }
}

impl From<DotNetPrPipeline> for PipelineDefinition {
    fn from(pipeline: DotNetPrPipeline) -> Self {
        pipeline.definition()
    }
}
