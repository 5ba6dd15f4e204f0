//! Command implementations for the BoM observations CLI
//!
//! This module contains the command execution logic, progress reporting,
//! and error handling for the CLI interface. Each command is implemented in
//! its own module.

pub mod batch;
pub mod parse;
pub mod shared;
pub mod summary;

pub use shared::ProcessingStats;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Main command runner
///
/// Sets up logging and configuration, then dispatches to the subcommand:
/// - `parse`: one bulletin to a JSON database export
/// - `summary`: colored overview of one bulletin
/// - `batch`: concurrent parsing of a directory of bulletins
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<ProcessingStats> {
    shared::setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = shared::load_configuration(&args)?;
    let show_progress = args.show_progress();

    let Some(command) = args.command else {
        info!("No command given");
        return Ok(ProcessingStats::default());
    };

    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args, &config).await,
        Commands::Summary(summary_args) => summary::run_summary(summary_args, &config).await,
        Commands::Batch(batch_args) => {
            batch::run_batch(batch_args, &config, show_progress, cancellation_token).await
        }
    }
}
