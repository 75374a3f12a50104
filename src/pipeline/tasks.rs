//! Reusable .NET task steps
//!
//! Plain constructors for the steps every .NET pipeline in this crate is
//! assembled from.

use super::steps::{DotNetCommand, Step};

/// Provider variable holding the artifact staging directory
pub const ARTIFACT_STAGING_DIRECTORY: &str = "$(Build.ArtifactStagingDirectory)";

/// Checks out the pipeline's own repository
#[must_use]
pub fn checkout() -> Step {
    Step::checkout()
}

/// Restores NuGet packages for every project
#[must_use]
pub fn restore() -> Step {
    Step::dotnet(
        DotNetCommand::Restore,
        "Restore NuGet packages",
        "**/*.csproj",
        None,
    )
}

/// Builds every solution in Release configuration
#[must_use]
pub fn build() -> Step {
    Step::dotnet(
        DotNetCommand::Build,
        "Build solution",
        "**/*.sln",
        Some("--configuration Release --no-restore"),
    )
}

/// Runs every test project
#[must_use]
pub fn test() -> Step {
    Step::dotnet(
        DotNetCommand::Test,
        "Run unit tests",
        "**/*Tests.csproj",
        Some("--configuration Release --no-build --verbosity normal"),
    )
}

/// Publishes the application into the artifact staging directory
#[must_use]
pub fn publish() -> Step {
    let arguments =
        format!("--configuration Release --no-build --output {ARTIFACT_STAGING_DIRECTORY}");
    Step::dotnet(
        DotNetCommand::Publish,
        "Publish application",
        "**/*.csproj",
        Some(arguments.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::steps::DotNetCliStep;
    use pretty_assertions::assert_eq;

    fn cli(step: Step) -> DotNetCliStep {
        match step {
            Step::DotNetCli(task) => task,
            Step::Checkout(_) => panic!("expected a CLI step"),
        }
    }

    #[test]
    fn test_restore() {
        let task = cli(restore());
        assert_eq!(task.command, DotNetCommand::Restore);
        assert_eq!(task.display_name, "Restore NuGet packages");
        assert_eq!(task.projects, "**/*.csproj");
        assert_eq!(task.arguments, None);
    }

    #[test]
    fn test_build() {
        let task = cli(build());
        assert_eq!(task.command, DotNetCommand::Build);
        assert_eq!(task.display_name, "Build solution");
        assert_eq!(task.projects, "**/*.sln");
        assert_eq!(
            task.arguments.as_deref(),
            Some("--configuration Release --no-restore")
        );
    }

    #[test]
    fn test_test() {
        let task = cli(test());
        assert_eq!(task.command, DotNetCommand::Test);
        assert_eq!(task.display_name, "Run unit tests");
        assert_eq!(task.projects, "**/*Tests.csproj");
        assert_eq!(
            task.arguments.as_deref(),
            Some("--configuration Release --no-build --verbosity normal")
        );
    }

    #[test]
    fn test_publish_keeps_variable_token() {
        let task = cli(publish());
        assert_eq!(task.command, DotNetCommand::Publish);
        assert_eq!(task.display_name, "Publish application");
        assert_eq!(task.projects, "**/*.csproj");
        assert_eq!(
            task.arguments.as_deref(),
            Some("--configuration Release --no-build --output $(Build.ArtifactStagingDirectory)")
        );
    }

    #[test]
    fn test_factories_are_pure() {
        assert_eq!(restore(), restore());
        assert_eq!(publish(), publish());
        assert!(checkout().is_checkout());
    }
}
