//! Command-line argument definitions for the BoM observations tool
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::DEFAULT_BULLETIN_PATTERN;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Maximum number of concurrent bulletin workers
const MAX_WORKERS: usize = 100;

/// CLI arguments for the BoM observations tool
///
/// Converts Bureau of Meteorology XML observation bulletins into normalized
/// station and observation records ready for database loading.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bom-observations",
    version,
    about = "Convert BoM XML observation bulletins into database-ready records",
    long_about = "Parses Australian Bureau of Meteorology observation bulletins (such as IDV60920) \
                  into one metadata record, one record per station and the latest observation for \
                  each station. Results are written as JSON exports that map directly onto \
                  database rows."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Configuration file path
    ///
    /// When omitted, `<config dir>/bom-observations/config.toml` is used if it
    /// exists, otherwise built-in defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Configuration file path"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one bulletin and write its JSON database export
    Parse(ParseArgs),
    /// Print a human-readable summary of one bulletin
    Summary(SummaryArgs),
    /// Parse every bulletin in a directory
    Batch(BatchArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Bulletin XML file to parse
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write the JSON export to this file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for the JSON export"
    )]
    pub output: Option<PathBuf>,

    /// Write compact JSON regardless of configuration
    #[arg(long = "compact", help = "Write compact JSON")]
    pub compact: bool,
}

/// Arguments for the summary command
#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    /// Bulletin XML file to summarize
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Number of stations to list
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "N",
        help = "Number of stations to list (overrides configuration)"
    )]
    pub limit: Option<usize>,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Directory searched recursively for bulletins
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// File name pattern for bulletins
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "GLOB",
        default_value = DEFAULT_BULLETIN_PATTERN,
        help = "File name pattern for bulletins"
    )]
    pub pattern: String,

    /// Number of bulletins parsed concurrently
    ///
    /// Defaults to the number of CPU cores.
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Directory receiving one JSON export per bulletin
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory for JSON exports"
    )]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate arguments shared by all commands
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        match &self.command {
            Some(Commands::Parse(args)) => validate_input_file(&args.input),
            Some(Commands::Summary(args)) => args.validate(),
            Some(Commands::Batch(args)) => args.validate(),
            None => Ok(()),
        }
    }
}

impl SummaryArgs {
    /// Validate the summary command arguments
    pub fn validate(&self) -> Result<()> {
        validate_input_file(&self.input)?;
        if self.limit == Some(0) {
            return Err(Error::configuration("Summary limit must be greater than 0"));
        }
        Ok(())
    }
}

impl BatchArgs {
    /// Validate the batch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0",
                ));
            }
            if workers > MAX_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        glob::Pattern::new(&self.pattern).map_err(|e| {
            Error::configuration(format!("Invalid file pattern '{}': {}", self.pattern, e))
        })?;

        if let Some(output_dir) = &self.output_dir {
            if output_dir.exists() && !output_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Output path is not a directory: {}",
                    output_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Number of workers, falling back to the CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

fn validate_input_file(path: &std::path::Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "Bulletin file does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_command() {
        let args = parse(&["bom-observations", "parse", "IDV60920.xml", "-o", "out.json"]);
        match args.command {
            Some(Commands::Parse(parse_args)) => {
                assert_eq!(parse_args.input, PathBuf::from("IDV60920.xml"));
                assert_eq!(parse_args.output, Some(PathBuf::from("out.json")));
                assert!(!parse_args.compact);
            }
            other => panic!("expected parse command, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_defaults() {
        let args = parse(&["bom-observations", "batch", "bulletins/"]);
        match args.command {
            Some(Commands::Batch(batch_args)) => {
                assert_eq!(batch_args.pattern, "*.xml");
                assert_eq!(batch_args.workers, None);
                assert!(batch_args.worker_count() >= 1);
                assert!(batch_args.output_dir.is_none());
            }
            other => panic!("expected batch command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["bom-observations", "summary", "a.xml", "-vv", "-c", "cfg.toml"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(args.config_file, Some(PathBuf::from("cfg.toml")));
        assert!(args.show_progress());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse(&["bom-observations"]).get_log_level(), "warn");
        assert_eq!(parse(&["bom-observations", "-v"]).get_log_level(), "info");
        assert_eq!(parse(&["bom-observations", "-vvvv"]).get_log_level(), "trace");

        let quiet = parse(&["bom-observations", "-q"]);
        assert_eq!(quiet.get_log_level(), "error");
        assert!(!quiet.show_progress());

        assert!(Args::try_parse_from(["bom-observations", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_file_validation() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        assert!(parse(&["bom-observations", "parse", path]).validate().is_ok());
        assert!(
            parse(&["bom-observations", "parse", "/nonexistent/IDV60920.xml"])
                .validate()
                .is_err()
        );
        assert!(
            parse(&["bom-observations", "summary", path, "--limit", "0"])
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_batch_validation() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap();

        assert!(parse(&["bom-observations", "batch", dir]).validate().is_ok());
        assert!(
            parse(&["bom-observations", "batch", dir, "--workers", "0"])
                .validate()
                .is_err()
        );
        assert!(
            parse(&["bom-observations", "batch", dir, "--workers", "101"])
                .validate()
                .is_err()
        );
        assert!(
            parse(&["bom-observations", "batch", dir, "--pattern", "[x"])
                .validate()
                .is_err()
        );
        assert!(
            parse(&["bom-observations", "batch", "/nonexistent/dir"])
                .validate()
                .is_err()
        );
    }
}
