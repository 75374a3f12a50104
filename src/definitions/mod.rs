//! Built-in pipeline definitions
//!
//! The catalog is what `azpipe generate` renders when no definition is
//! selected explicitly.

pub mod dotnet_build;
pub mod dotnet_pr;

pub use dotnet_build::DotNetBuildPipeline;
pub use dotnet_pr::DotNetPrPipeline;

use crate::pipeline::{BuildPool, PipelineDefinition};
use serde::{Deserialize, Serialize};

/// File the catalog's build pipeline is written to
pub const CATALOG_BUILD_FILE: &str = "azure-pipelines.yml";

/// File the catalog's PR pipeline is written to
pub const CATALOG_PR_FILE: &str = "azure-pipelines-pr.yml";

/// Pools used by the built-in definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Pool of the build stage
    pub build: BuildPool,
    /// Pool of the publish stage
    pub publish: BuildPool,
    /// Pool of the PR validation job
    pub pr: BuildPool,
}

/// Returns the built-in definitions in generation order
#[must_use]
pub fn catalog(pools: &PoolSettings) -> Vec<PipelineDefinition> {
    vec![
        DotNetBuildPipeline::new(CATALOG_BUILD_FILE)
            .with_build_pool(pools.build)
            .with_publish_pool(pools.publish)
            .definition(),
        DotNetPrPipeline::in_output_dir(CATALOG_PR_FILE)
            .with_pool(pools.pr)
            .definition(),
    ]
}

/// Looks a built-in definition up by name
#[must_use]
pub fn find(pools: &PoolSettings, name: &str) -> Option<PipelineDefinition> {
    catalog(pools).into_iter().find(|d| d.name == name)
}

/// Names of all built-in definitions
#[must_use]
pub fn names() -> Vec<&'static str> {
    vec![dotnet_build::NAME, dotnet_pr::NAME]
}
