//! Infrastructure layer
//!
//! This module contains the YAML backend, configuration and logging.

mod azure_pipelines;
mod config;
mod logging;

pub use azure_pipelines::{AzurePipelinesSerializer, SerializerOptions};
pub use config::{Config, ConfigError, DEFAULT_CONFIG_FILE};
pub use logging::{LogHandle, STARTUP_LOG_LEVEL, init_logging};
