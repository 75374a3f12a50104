//! CLI tools for azpipe
//!
//! - `generate`: render the built-in definitions to YAML files
//! - `list`: show the built-in definitions and where they are written
//! - `show`: print one definition's YAML
//! - `completions`: generate shell completions

pub mod completions;
pub mod generate;
pub mod list;
pub mod show;

use anyhow::{Context, Result};
use azpipe::definitions::PoolSettings;
use azpipe::infrastructure::{Config, STARTUP_LOG_LEVEL, init_logging};
use azpipe::pipeline::BuildPool;
use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for azpipe
#[derive(Parser, Debug)]
#[command(name = "azpipe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to azpipe.yaml in the repository root)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Repository root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    repo_root: Option<PathBuf>,

    /// Pool overrides for the built-in definitions
    #[command(flatten)]
    pools: PoolArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(ClapArgs, Debug, Default)]
struct PoolArgs {
    /// Pool of the build stage (name or identifier, e.g. ubuntu-22.04)
    #[arg(long, global = true, value_name = "POOL")]
    build_pool: Option<String>,

    /// Pool of the publish stage
    #[arg(long, global = true, value_name = "POOL")]
    publish_pool: Option<String>,

    /// Pool of the PR validation job
    #[arg(long, global = true, value_name = "POOL")]
    pr_pool: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render pipeline definitions to YAML files
    Generate {
        /// Output directory, relative to the repository root
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Only generate the named definitions
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,
        /// Serialize but do not write files
        #[arg(long)]
        dry_run: bool,
        /// Omit the generated-file header
        #[arg(long)]
        no_header: bool,
    },

    /// List the built-in definitions
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Print one definition's YAML to stdout
    Show {
        /// Definition name
        name: String,
        /// Omit the generated-file header
        #[arg(long)]
        no_header: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Resolved settings shared by the subcommands
#[derive(Debug, Clone)]
pub struct Session {
    /// Repository root
    pub repo_root: PathBuf,
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
}

impl Session {
    /// Pools for the built-in definitions
    #[must_use]
    pub fn pools(&self) -> PoolSettings {
        self.config.pools()
    }
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

fn open_session(
    config: Option<&Path>,
    repo_root: Option<PathBuf>,
    pools: PoolArgs,
) -> Result<Session> {
    let repo_root = match repo_root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut config = Config::discover(config, &repo_root)?;
    apply_pool_overrides(&mut config, pools);

    Ok(Session { repo_root, config })
}

fn apply_pool_overrides(config: &mut Config, pools: PoolArgs) {
    if let Some(name) = pools.build_pool {
        config.build_pool = BuildPool::from_name_or_default(&name);
    }
    if let Some(name) = pools.publish_pool {
        config.publish_pool = BuildPool::from_name_or_default(&name);
    }
    if let Some(name) = pools.pr_pool {
        config.pr_pool = BuildPool::from_name_or_default(&name);
    }
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();

    let logging = init_logging(if args.verbose {
        "debug"
    } else {
        STARTUP_LOG_LEVEL
    });

    let session = open_session(args.config.as_deref(), args.repo_root, args.pools)?;
    if !args.verbose {
        logging.set_level(&session.config.log_level);
    }

    match args.command {
        Command::Generate {
            output_dir,
            only,
            dry_run,
            no_header,
        } => {
            let options = generate::GenerateOptions {
                output_dir,
                only,
                dry_run,
                no_header,
            };
            generate::generate(&session, &options)?;
        }
        Command::List { format } => {
            let output = match format {
                ListFormat::Text => list::format_text(&session),
                ListFormat::Json => list::format_json(&session)?,
            };
            println!("{output}");
        }
        Command::Show { name, no_header } => {
            print!("{}", show::render(&session, &name, no_header)?);
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{completions}");
            }
        }
    }

    Ok(())
}
