//! # azpipe - Typed Azure DevOps pipelines in Rust
//!
//! azpipe describes Azure DevOps pipelines as ordinary Rust values (stages,
//! jobs, pools and steps) and renders them to the provider's YAML schema,
//! so the YAML in a repository is generated instead of hand-written.
//!
//! ## Quick Start
//!
//! ```
//! use azpipe::prelude::*;
//!
//! let definition = DotNetPrPipeline::new("pr.yml", ".azdo")
//!     .with_pool(BuildPool::Ubuntu2204)
//!     .definition();
//!
//! let yaml = AzurePipelinesSerializer::default().serialize(&definition).unwrap();
//! assert!(yaml.contains("vmImage: ubuntu-22.04"));
//! ```
//!
//! ## Layout
//!
//! - [`pipeline`]: the model (pools, steps, jobs, stages, definitions)
//! - [`definitions`]: the built-in .NET build and PR pipelines
//! - [`infrastructure`]: YAML backend, configuration, logging
//! - [`generator`]: writes a set of definitions to disk
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod definitions;
pub mod generator;
pub mod infrastructure;
pub mod pipeline;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use definitions::{DotNetBuildPipeline, DotNetPrPipeline, PoolSettings};
pub use generator::{GenerationReport, Generator, GeneratorError, GeneratorSettings, Outcome};
pub use infrastructure::{AzurePipelinesSerializer, Config, SerializerOptions};
pub use pipeline::{
    BuildPool, HostedPool, Job, Pipeline, PipelineBody, PipelineBuilder, PipelineDefinition,
    PipelineError, SingleStagePipeline, Stage, Step, TargetPathType, Validate, ValidationError,
};

/// Version of the azpipe crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
