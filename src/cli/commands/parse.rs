//! Parse command: one bulletin in, one JSON database export out

use crate::app::services::bulletin_parser::BulletinParser;
use crate::app::services::export::DatabaseExport;
use crate::cli::args::ParseArgs;
use crate::cli::commands::shared::ProcessingStats;
use crate::config::Config;
use crate::{Error, Result};
use std::io::Write;
use std::time::Instant;
use tracing::info;

/// Run the parse command
pub async fn run_parse(args: ParseArgs, config: &Config) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let parser = BulletinParser::with_config(config.parser.clone());

    let input = args.input.clone();
    let (bulletin, parse_stats) =
        tokio::task::spawn_blocking(move || parser.parse_file_with_stats(&input))
            .await
            .map_err(|e| Error::io("Parse task failed", std::io::Error::other(e)))??;

    let mut stats = ProcessingStats::default();
    stats.record_bulletin(&parse_stats);

    let export = DatabaseExport::from_bulletin(&bulletin);
    let pretty = config.output.pretty_json && !args.compact;

    match &args.output {
        Some(path) => {
            export.write_json_file(path, pretty)?;
            stats.record_output(path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export.write_json(&mut handle, pretty)?;
            writeln!(handle).map_err(|e| Error::io("Failed to write to stdout", e))?;
        }
    }

    stats.processing_time = start_time.elapsed();
    info!(
        "Parsed {} in {:.2}s",
        args.input.display(),
        stats.processing_time.as_secs_f64()
    );

    Ok(stats)
}
