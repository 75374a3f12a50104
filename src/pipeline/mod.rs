//! Pipeline domain types and logic

pub mod errors;
pub mod job;
pub mod pipeline_def;
pub mod pool;
pub mod stage;
pub mod steps;
pub mod tasks;
pub mod types;


// Re-export public types from submodules
pub use errors::{PipelineError, ValidationError};
pub use job::Job;
pub use pipeline_def::{
    Pipeline, PipelineBody, PipelineBuilder, PipelineDefinition, SingleStagePipeline,
};
pub use pool::{BuildPool, DEFAULT_POOL_IDENTIFIER, HostedPool};
pub use stage::Stage;
pub use steps::{CheckoutStep, DotNetCliStep, DotNetCommand, Step};
pub use types::{TargetPathType, Validate};
