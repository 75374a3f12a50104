//! azpipe - generate Azure DevOps pipeline YAML from typed definitions
//!
//! ## Commands
//!
//! - `azpipe generate` - Write the built-in definitions under `.azdo/`
//! - `azpipe list` - Show the built-in definitions and their targets
//! - `azpipe show <name>` - Print one definition's YAML
//! - `azpipe completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Write .azdo/azure-pipelines.yml and .azdo/azure-pipelines-pr.yml
//! azpipe generate
//!
//! # Run the PR job on Windows and preview without writing
//! azpipe generate --only dotnet-pr --pr-pool windows-2022 --dry-run
//!
//! # Generate shell completions
//! azpipe completions bash > /etc/bash_completion.d/azpipe
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("AZPIPE_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
