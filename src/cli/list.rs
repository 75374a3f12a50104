//! `azpipe list` - Show the built-in definitions

use super::Session;
use anyhow::{Context, Result};
use azpipe::definitions;
use azpipe::pipeline::TargetPathType;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// One row of the listing
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionEntry {
    /// Definition name
    pub name: String,
    /// Target file as declared
    pub target_file: String,
    /// Path resolution mode
    pub path_type: TargetPathType,
    /// Resolved output path
    pub path: PathBuf,
    /// Whether the definition is stage-wrapped
    pub multi_stage: bool,
    /// Pool identifier of every job, in order
    pub pools: Vec<String>,
}

/// Collects the listing rows
pub fn entries(session: &Session) -> Vec<DefinitionEntry> {
    let output_dir = session.repo_root.join(&session.config.output_dir);

    definitions::catalog(&session.pools())
        .into_iter()
        .map(|def| DefinitionEntry {
            path: def.target_path(&session.repo_root, &output_dir),
            multi_stage: def.body.is_multi_stage(),
            pools: def
                .body
                .jobs()
                .map(|j| j.pool.identifier().to_string())
                .collect(),
            name: def.name,
            target_file: def.target_file,
            path_type: def.path_type,
        })
        .collect()
}

/// Formats the listing as aligned text
pub fn format_text(session: &Session) -> String {
    let mut out = String::new();
    for entry in entries(session) {
        let shape = if entry.multi_stage {
            "multi-stage"
        } else {
            "single-stage"
        };
        let _ = writeln!(
            out,
            "{:<14} {:<12} {} [{}]",
            entry.name,
            shape,
            entry
                .path
                .strip_prefix(&session.repo_root)
                .unwrap_or(&entry.path)
                .display(),
            entry.pools.join(", ")
        );
    }
    out.trim_end().to_string()
}

/// Formats the listing as JSON
pub fn format_json(session: &Session) -> Result<String> {
    serde_json::to_string_pretty(&entries(session)).context("Failed to encode definition list")
}
