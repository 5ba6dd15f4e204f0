//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of bulletins parsed successfully
    pub bulletins_processed: usize,
    /// Number of bulletins that could not be parsed or written
    pub bulletins_failed: usize,
    /// Number of station records produced
    pub stations_parsed: usize,
    /// Number of observation records produced
    pub observations_parsed: usize,
    /// Number of station elements skipped
    pub stations_skipped: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Export files written with their sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Fold the counts of one parsed bulletin into the totals
    pub fn record_bulletin(&mut self, stats: &crate::app::services::bulletin_parser::ParseStats) {
        self.bulletins_processed += 1;
        self.stations_parsed += stats.stations_parsed;
        self.observations_parsed += stats.observations_parsed;
        self.stations_skipped += stats.stations_skipped;
    }

    /// Record an export file that was written
    pub fn record_output(&mut self, path: &Path) {
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        self.output_sizes.push((path.display().to_string(), size));
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for all commands
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bom_observations={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from the explicit file, the default location or defaults
pub fn load_configuration(args: &Args) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, checking default location"),
    }

    let config = Config::load(args.config_file.as_deref())?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Discover bulletin files under a directory whose names match a glob pattern
pub fn discover_bulletins(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = glob::Pattern::new(pattern).map_err(|e| {
        Error::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
    })?;

    let mut bulletins: Vec<PathBuf> = WalkDir::new(input_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| matcher.matches(name))
        })
        .map(|entry| entry.into_path())
        .collect();

    // Sort files for consistent processing order
    bulletins.sort();

    debug!(
        "Discovered {} bulletins matching '{}' in {}",
        bulletins.len(),
        pattern,
        input_dir.display()
    );
    Ok(bulletins)
}

/// Path of the JSON export written for a bulletin
///
/// The bulletin's location relative to `input_dir` is mirrored under
/// `output_dir`, so same-named bulletins in different subdirectories do not
/// overwrite each other.
pub fn export_path(output_dir: &Path, input_dir: &Path, bulletin: &Path) -> PathBuf {
    let relative = bulletin
        .strip_prefix(input_dir)
        .ok()
        .filter(|relative| relative.file_name().is_some())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| {
            PathBuf::from(bulletin.file_name().unwrap_or(OsStr::new("bulletin")))
        });
    output_dir.join(relative).with_extension("json")
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}
