//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! semilla init config.yaml
//! semilla init config.yaml --report init_report.txt --export weights.json
//! semilla validate config.yaml
//! semilla info config.yaml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Semilla: component-tree weight initialization with provenance
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "semilla")]
#[command(version)]
#[command(about = "Initialize component-tree models from declarative YAML specs")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build the tree from a YAML spec and run initialization
    Init(InitArgs),

    /// Validate a specification without initializing
    Validate(ValidateArgs),

    /// Display a summary of a specification
    Info(InfoArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Path to YAML specification file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Write the provenance report here (overrides the spec's `report` field)
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Export the initialized weights as a JSON checkpoint
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML specification file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML specification file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init_command() {
        let cli = parse_args(["semilla", "init", "config.yaml"]).unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(args.report.is_none());
                assert!(args.export.is_none());
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_init_with_report_and_export() {
        let cli = parse_args([
            "semilla",
            "init",
            "config.yaml",
            "--report",
            "report.txt",
            "--export",
            "weights.json",
        ])
        .unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.report, Some(PathBuf::from("report.txt")));
                assert_eq!(args.export, Some(PathBuf::from("weights.json")));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_validate_command() {
        let cli = parse_args(["semilla", "validate", "config.yaml"]).unwrap();
        assert!(matches!(cli.command, Command::Validate(_)));
    }

    #[test]
    fn test_parse_info_command() {
        let cli = parse_args(["semilla", "info", "config.yaml"]).unwrap();
        assert!(matches!(cli.command, Command::Info(_)));
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["semilla", "-v", "init", "config.yaml"]).unwrap();
        assert!(cli.verbose && !cli.quiet);

        let cli = parse_args(["semilla", "-q", "init", "config.yaml"]).unwrap();
        assert!(!cli.verbose && cli.quiet);
    }

    #[test]
    fn test_missing_config_file() {
        assert!(parse_args(["semilla", "init"]).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_args(["semilla", "unknown"]).is_err());
    }
}
