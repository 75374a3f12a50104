//! Step types for pipeline jobs
//!
//! This module defines the steps a job executes, in order: checking out
//! the repository and invoking the .NET CLI task.

#![allow(clippy::must_use_candidate, clippy::return_self_not_must_use)]

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Task reference emitted for .NET CLI steps
pub const DOTNET_CLI_TASK: &str = "DotNetCoreCLI@2";

/// Verbs understood by the .NET CLI task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotNetCommand {
    /// `dotnet restore`
    Restore,
    /// `dotnet build`
    Build,
    /// `dotnet test`
    Test,
    /// `dotnet publish`
    Publish,
}

impl DotNetCommand {
    /// Returns the verb as it appears in the task inputs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restore => "restore",
            Self::Build => "build",
            Self::Test => "test",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for DotNetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository checkout step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutStep {
    /// Repository alias, `self` for the pipeline's own repository
    pub checkout: String,
}

impl CheckoutStep {
    /// Checks out the repository the pipeline lives in
    pub fn self_repo() -> Self {
        Self {
            checkout: "self".to_string(),
        }
    }
}

/// Invocation of the .NET CLI task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNetCliStep {
    /// Command verb
    pub command: DotNetCommand,
    /// Name shown in the run summary
    pub display_name: String,
    /// Glob selecting the projects the command runs against
    pub projects: String,
    /// Extra command-line arguments, passed through verbatim
    pub arguments: Option<String>,
}

impl DotNetCliStep {
    /// Creates a CLI step with no extra arguments
    pub fn new(
        command: DotNetCommand,
        display_name: impl Into<String>,
        projects: impl Into<String>,
    ) -> Self {
        Self {
            command,
            display_name: display_name.into(),
            projects: projects.into(),
            arguments: None,
        }
    }

    /// Sets the extra arguments
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }
}

#[derive(Serialize)]
struct DotNetInputs<'a> {
    command: DotNetCommand,
    projects: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    arguments: Option<&'a str>,
}

impl Serialize for DotNetCliStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("task", DOTNET_CLI_TASK)?;
        map.serialize_entry("displayName", &self.display_name)?;
        map.serialize_entry(
            "inputs",
            &DotNetInputs {
                command: self.command,
                projects: &self.projects,
                arguments: self.arguments.as_deref(),
            },
        )?;
        map.end()
    }
}

/// A single step in a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Step {
    /// Source checkout
    Checkout(CheckoutStep),
    /// .NET CLI task
    DotNetCli(DotNetCliStep),
}

impl Step {
    /// Creates a checkout step for the pipeline's own repository
    pub fn checkout() -> Self {
        Self::Checkout(CheckoutStep::self_repo())
    }

    /// Creates a .NET CLI step
    pub fn dotnet(
        command: DotNetCommand,
        display_name: impl Into<String>,
        projects: impl Into<String>,
        arguments: Option<&str>,
    ) -> Self {
        let step = DotNetCliStep::new(command, display_name, projects);
        Self::DotNetCli(match arguments {
            Some(args) => step.with_arguments(args),
            None => step,
        })
    }

    /// Returns true for a checkout step
    pub fn is_checkout(&self) -> bool {
        matches!(self, Self::Checkout(_))
    }

    /// Returns the CLI verb, if this is a CLI step
    pub fn command(&self) -> Option<DotNetCommand> {
        match self {
            Self::DotNetCli(task) => Some(task.command),
            Self::Checkout(_) => None,
        }
    }

    /// Returns the label used in logs and error messages
    pub fn label(&self) -> &str {
        match self {
            Self::Checkout(c) => &c.checkout,
            Self::DotNetCli(task) => &task.display_name,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkout(c) => write!(f, "checkout({})", c.checkout),
            Self::DotNetCli(task) => write!(f, "dotnet {}({})", task.command, task.projects),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_step() {
        let step = Step::checkout();
        assert!(step.is_checkout());
        assert_eq!(step.command(), None);
        assert_eq!(step.to_string(), "checkout(self)");
    }

    #[test]
    fn test_dotnet_step() {
        let step = Step::dotnet(DotNetCommand::Build, "Build", "**/*.sln", Some("-c Release"));
        assert!(!step.is_checkout());
        assert_eq!(step.command(), Some(DotNetCommand::Build));
        assert_eq!(step.label(), "Build");
        assert_eq!(step.to_string(), "dotnet build(**/*.sln)");
    }

    #[test]
    fn test_checkout_serializes() {
        let yaml = serde_yaml::to_string(&Step::checkout()).unwrap();
        assert_eq!(yaml, "checkout: self\n");
    }

    #[test]
    fn test_dotnet_step_serializes_task_shape() {
        let step = Step::dotnet(DotNetCommand::Test, "Run", "tests", Some("--no-build"));
        let value = serde_yaml::to_value(&step).unwrap();

        assert_eq!(value["task"].as_str(), Some(DOTNET_CLI_TASK));
        assert_eq!(value["displayName"].as_str(), Some("Run"));
        assert_eq!(value["inputs"]["command"].as_str(), Some("test"));
        assert_eq!(value["inputs"]["projects"].as_str(), Some("tests"));
        assert_eq!(value["inputs"]["arguments"].as_str(), Some("--no-build"));
    }

    #[test]
    fn test_missing_arguments_are_omitted() {
        let step = Step::dotnet(DotNetCommand::Restore, "Restore", "**/*.csproj", None);
        let yaml = serde_yaml::to_string(&step).unwrap();
        assert!(!yaml.contains("arguments"));
    }

    #[test]
    fn test_command_display() {
        assert_eq!(DotNetCommand::Publish.to_string(), "publish");
        assert_eq!(
            serde_json::to_string(&DotNetCommand::Restore).unwrap(),
            r#""restore""#
        );
    }
}
