//! Prelude module for common imports

pub use crate::pipeline::errors::{PipelineError, ValidationError};
pub use crate::pipeline::job::Job;
pub use crate::pipeline::pipeline_def::{
    Pipeline, PipelineBody, PipelineBuilder, PipelineDefinition, SingleStagePipeline,
};
pub use crate::pipeline::pool::{BuildPool, HostedPool};
pub use crate::pipeline::stage::Stage;
pub use crate::pipeline::steps::{DotNetCommand, Step};
pub use crate::pipeline::tasks;
pub use crate::pipeline::types::{TargetPathType, Validate};

pub use crate::definitions::{DotNetBuildPipeline, DotNetPrPipeline, PoolSettings};
pub use crate::generator::{GenerationReport, Generator, GeneratorSettings};
pub use crate::infrastructure::{AzurePipelinesSerializer, SerializerOptions};
