//! `azpipe show` - Print one definition's YAML

use super::Session;
use anyhow::{Context, Result};
use azpipe::definitions;
use azpipe::infrastructure::{AzurePipelinesSerializer, SerializerOptions};

/// Renders the named built-in definition
pub fn render(session: &Session, name: &str, no_header: bool) -> Result<String> {
    let definition = definitions::find(&session.pools(), name).with_context(|| {
        format!(
            "Unknown definition '{}'. Available: {}",
            name,
            definitions::names().join(", ")
        )
    })?;

    let serializer = AzurePipelinesSerializer::new(SerializerOptions {
        include_header: session.config.include_header && !no_header,
    });

    serializer
        .serialize(&definition)
        .with_context(|| format!("Failed to render '{name}'"))
}
