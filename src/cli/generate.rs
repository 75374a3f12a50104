//! `azpipe generate` - Render definitions to YAML files
//!
//! Writes every selected definition, then prints a summary. A failing
//! definition is reported and skipped; only an output directory that cannot
//! be created fails the command.

use super::Session;
use anyhow::{Result, bail};
use azpipe::definitions;
use azpipe::generator::{GenerationReport, Generator, GeneratorSettings, Outcome};
use azpipe::infrastructure::SerializerOptions;
use azpipe::pipeline::PipelineDefinition;
use colored::Colorize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Options of the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Definition names to restrict to; empty means all
    pub only: Vec<String>,
    /// Serialize without writing
    pub dry_run: bool,
    /// Omit the generated-file header
    pub no_header: bool,
}

/// Picks the definitions to generate, in catalog order
pub fn select_definitions(session: &Session, only: &[String]) -> Result<Vec<PipelineDefinition>> {
    let catalog = definitions::catalog(&session.pools());

    if only.is_empty() {
        return Ok(catalog);
    }

    for name in only {
        if !catalog.iter().any(|d| &d.name == name) {
            bail!(
                "Unknown definition '{}'. Available: {}",
                name,
                definitions::names().join(", ")
            );
        }
    }

    Ok(catalog
        .into_iter()
        .filter(|d| only.contains(&d.name))
        .collect())
}

/// Builds generator settings from the session and command options
pub fn settings(session: &Session, options: &GenerateOptions) -> GeneratorSettings {
    GeneratorSettings {
        repo_root: session.repo_root.clone(),
        output_dir: options
            .output_dir
            .clone()
            .unwrap_or_else(|| session.config.output_dir.clone()),
        dry_run: options.dry_run,
        serializer: SerializerOptions {
            include_header: session.config.include_header && !options.no_header,
        },
    }
}

/// Runs the generate command and prints the summary
pub fn generate(session: &Session, options: &GenerateOptions) -> Result<GenerationReport> {
    let selected = select_definitions(session, &options.only)?;
    let generator = Generator::new(settings(session, options));

    println!("{}", "Azure DevOps pipeline generator".bold());
    println!(
        "Generating {} definition(s)...",
        selected.len().to_string().cyan()
    );

    let report = generator.run(&selected)?;
    print!("{}", format_report(&report, &session.repo_root));

    Ok(report)
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Formats the human-readable summary
pub fn format_report(report: &GenerationReport, root: &Path) -> String {
    let mut out = String::new();

    for definition in &report.definitions {
        match &definition.outcome {
            Outcome::Generated { path, bytes } => {
                let _ = writeln!(
                    out,
                    "  {} {} -> {} ({} bytes)",
                    "✓".green(),
                    definition.name,
                    display_path(path, root),
                    bytes
                );
            }
            Outcome::Failed { error, .. } => {
                let _ = writeln!(out, "  {} {}: {}", "✗".red(), definition.name, error);
            }
        }
    }

    let generated = report.generated().count();
    let failed = report.failed().count();

    out.push('\n');
    let _ = writeln!(
        out,
        "Output directory: {}",
        display_path(&report.output_dir, root)
    );
    let verb = if report.dry_run {
        "Would generate"
    } else {
        "Generated"
    };
    let _ = writeln!(out, "{verb}: {generated}, failed: {failed}");

    if report.is_success() {
        let _ = writeln!(out, "{}", "Pipeline generation completed.".green());
    } else {
        let _ = writeln!(
            out,
            "{}",
            "Pipeline generation completed with errors.".yellow()
        );
    }

    out
}
