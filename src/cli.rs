//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the feature templater.
#[derive(Parser, Debug)]
#[command(
    name = "templater",
    about = "Apply patch-based features to projects",
    version = env!("TEMPLATER_VERSION")
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display available features as an ASCII tree
    List(ListOpts),
    /// Show features applied to a target project
    Status(StatusOpts),
    /// Apply features and their dependencies to a target project
    Apply(ApplyOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for log file naming.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Status(_) => "status",
            Self::Apply(_) => "apply",
            Self::Version => "version",
        }
    }
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// Template repository to scan
    pub template: PathBuf,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StatusOpts {
    /// Target project directory
    pub target: PathBuf,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Template repository holding the feature patches
    pub template: PathBuf,

    /// Target project directory
    pub target: PathBuf,

    /// Features to apply (dependencies are added automatically)
    #[arg(conflicts_with = "file")]
    pub features: Vec<String>,

    /// Read features from file (one per line)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Show what would be applied without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Per-patch timeout in seconds (overrides templater.toml)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from(["templater", "list", "tpl"]);
        assert!(
            matches!(&cli.command, Command::List(opts) if opts.template == PathBuf::from("tpl")),
            "got {:?}",
            cli.command
        );
    }

    #[test]
    fn parse_status() {
        let cli = Cli::parse_from(["templater", "status", "project"]);
        assert!(matches!(cli.command, Command::Status(_)));
        assert_eq!(cli.command.name(), "status");
    }

    #[test]
    fn parse_apply_with_features() {
        let cli = Cli::parse_from(["templater", "apply", "tpl", "project", "auth/oauth", "database"]);
        assert!(matches!(&cli.command, Command::Apply(_)), "Expected Apply command");
        let Command::Apply(opts) = cli.command else {
            return;
        };
        assert_eq!(opts.template, PathBuf::from("tpl"));
        assert_eq!(opts.target, PathBuf::from("project"));
        assert_eq!(opts.features, vec!["auth/oauth", "database"]);
        assert!(!opts.dry_run);
        assert!(opts.file.is_none());
        assert!(opts.timeout.is_none());
    }

    #[test]
    fn parse_apply_dry_run_and_timeout() {
        let cli = Cli::parse_from([
            "templater", "apply", "--dry-run", "--timeout", "5", "tpl", "project", "auth",
        ]);
        assert!(matches!(
            cli.command,
            Command::Apply(ApplyOpts {
                dry_run: true,
                timeout: Some(5),
                ..
            })
        ));
    }

    #[test]
    fn parse_apply_with_file() {
        let cli = Cli::parse_from(["templater", "apply", "tpl", "project", "-f", "features.txt"]);
        assert!(matches!(
            &cli.command,
            Command::Apply(opts) if opts.file == Some(PathBuf::from("features.txt")) && opts.features.is_empty()
        ));
    }

    #[test]
    fn file_conflicts_with_positional_features() {
        let result = Cli::try_parse_from([
            "templater", "apply", "tpl", "project", "auth", "-f", "features.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn apply_requires_template_and_target() {
        assert!(Cli::try_parse_from(["templater", "apply", "tpl"]).is_err());
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["templater", "status", "project", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["templater", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.name(), "version");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["templater"]).is_err());
    }
}
