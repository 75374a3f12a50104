//! Azure Pipelines backend
//!
//! Renders pipeline definitions to Azure Pipelines YAML.

use crate::pipeline::{PipelineDefinition, PipelineError, Validate};

/// Options controlling the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Prepend the "generated file" comment block
    pub include_header: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

/// Backend for generating Azure Pipelines YAML
#[derive(Debug, Clone, Default)]
pub struct AzurePipelinesSerializer {
    options: SerializerOptions,
}

impl AzurePipelinesSerializer {
    /// Creates a serializer with the given options
    #[must_use]
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    /// Validates and renders a definition.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Validation`] when the graph breaks the
    /// provider's schema and [`PipelineError::Serialization`] when the YAML
    /// emitter fails.
    pub fn serialize(&self, definition: &PipelineDefinition) -> Result<String, PipelineError> {
        definition.validate()?;

        let body = serde_yaml::to_string(&definition.body)?;
        tracing::debug!(
            definition = %definition.name,
            bytes = body.len(),
            "Serialized pipeline"
        );

        if !self.options.include_header {
            return Ok(body);
        }

        let mut yaml = header(&definition.name);
        yaml.push_str(&body);
        Ok(yaml)
    }
}

fn header(definition: &str) -> String {
    format!(
        "### DO NOT MODIFY THIS FILE!\n\
         ### This YAML was generated by azpipe from the `{definition}` definition.\n\
         ### Regenerate it with `azpipe generate`.\n\n"
    )
}
