//! Batch command: parse every bulletin in a directory concurrently
//!
//! Bulletins are parsed on the blocking thread pool with at most `workers`
//! parses in flight. A bulletin that fails is logged and counted; the rest of
//! the batch carries on.

use crate::app::models::ParsedBulletin;
use crate::app::services::bulletin_parser::{BulletinParser, ParseStats};
use crate::app::services::export::DatabaseExport;
use crate::cli::args::BatchArgs;
use crate::cli::commands::shared::{
    ProcessingStats, create_progress_bar, discover_bulletins, export_path,
};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Outcome of one bulletin in the batch
struct BulletinResult {
    path: PathBuf,
    outcome: Result<(ParsedBulletin, ParseStats, Option<PathBuf>)>,
}

/// Run the batch command
pub async fn run_batch(
    args: BatchArgs,
    config: &Config,
    show_progress: bool,
    cancellation_token: CancellationToken,
) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let workers = args.worker_count();

    let bulletins = discover_bulletins(&args.input_dir, &args.pattern)?;
    if bulletins.is_empty() {
        warn!(
            "No bulletins matching '{}' found in {}",
            args.pattern,
            args.input_dir.display()
        );
        return Ok(ProcessingStats::default());
    }

    if let Some(output_dir) = &args.output_dir {
        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", output_dir.display()),
                e,
            )
        })?;
    }

    info!(
        "Parsing {} bulletins with {} workers",
        bulletins.len(),
        workers
    );

    let progress_bar = show_progress
        .then(|| create_progress_bar(bulletins.len() as u64, "Parsing bulletins..."));

    let parser = Arc::new(BulletinParser::with_config(config.parser.clone()));
    let pretty = config.output.pretty_json;
    let output_dir = args.output_dir.clone();
    let input_dir = Arc::new(args.input_dir.clone());

    let mut results = stream::iter(bulletins)
        .map(|path| {
            let parser = Arc::clone(&parser);
            let output_dir = output_dir.clone();
            let input_dir = Arc::clone(&input_dir);
            let cancellation_token = cancellation_token.clone();
            async move {
                if cancellation_token.is_cancelled() {
                    return None;
                }
                let task_path = path.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    let target = output_dir.as_deref().map(|dir| (dir, input_dir.as_path()));
                    process_bulletin(&parser, &task_path, target, pretty)
                })
                .await
                .map_err(|e| Error::io("Bulletin task failed", std::io::Error::other(e)))
                .and_then(|outcome| outcome);
                Some(BulletinResult { path, outcome })
            }
        })
        .buffer_unordered(workers);

    let mut stats = ProcessingStats::default();
    while let Some(result) = results.next().await {
        let Some(BulletinResult { path, outcome }) = result else {
            continue;
        };

        match outcome {
            Ok((bulletin, parse_stats, written)) => {
                debug!(
                    "Parsed {}: {} stations, {} observations",
                    path.display(),
                    bulletin.station_count(),
                    bulletin.observation_count()
                );
                stats.record_bulletin(&parse_stats);
                if let Some(written) = written {
                    stats.record_output(&written);
                }
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                stats.bulletins_failed += 1;
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Done");
    }

    if cancellation_token.is_cancelled() {
        warn!("Batch cancelled before all bulletins were parsed");
    }

    stats.processing_time = start_time.elapsed();
    if show_progress {
        print_batch_summary(&stats);
    }
    Ok(stats)
}

/// Parse one bulletin and optionally write its export
///
/// `output` pairs the export directory with the batch input directory.
fn process_bulletin(
    parser: &BulletinParser,
    path: &Path,
    output: Option<(&Path, &Path)>,
    pretty: bool,
) -> Result<(ParsedBulletin, ParseStats, Option<PathBuf>)> {
    let (bulletin, parse_stats) = parser.parse_file_with_stats(path)?;

    let written = match output {
        Some((output_dir, input_dir)) => {
            let target = export_path(output_dir, input_dir, path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create output directory {}", parent.display()),
                        e,
                    )
                })?;
            }
            DatabaseExport::from_bulletin(&bulletin).write_json_file(&target, pretty)?;
            Some(target)
        }
        None => None,
    };

    Ok((bulletin, parse_stats, written))
}

fn print_batch_summary(stats: &ProcessingStats) {
    println!("\n{}", "Batch Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Bulletins parsed:".bright_cyan(),
        stats.bulletins_processed
    );
    if stats.bulletins_failed > 0 {
        println!(
            "  {} {}",
            "Bulletins failed:".bright_red(),
            stats.bulletins_failed
        );
    }
    println!(
        "  {} {} stations, {} observations ({} stations skipped)",
        "Records:".bright_cyan(),
        stats.stations_parsed,
        stats.observations_parsed,
        stats.stations_skipped
    );
    if !stats.output_sizes.is_empty() {
        println!(
            "  {} {} files, {}",
            "Exports:".bright_cyan(),
            stats.output_sizes.len(),
            ProcessingStats::format_size(stats.total_output_size())
        );
    }
    println!(
        "  {} {:.2}s",
        "Elapsed:".bright_cyan(),
        stats.processing_time.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bulletin(bom_id: &str) -> String {
        format!(
            r#"<product>
  <amoc><identifier>IDV60920</identifier></amoc>
  <observations>
    <station bom-id="{}"><period index="0"><level type="surface">
      <element type="air_temperature">12.0</element>
    </level></period></station>
  </observations>
</product>"#,
            bom_id
        )
    }

    fn batch_args(input_dir: PathBuf, output_dir: Option<PathBuf>) -> BatchArgs {
        BatchArgs {
            input_dir,
            pattern: "*.xml".to_string(),
            workers: Some(2),
            output_dir,
        }
    }

    #[tokio::test]
    async fn test_batch_parses_all_and_counts_failures() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("a.xml"), bulletin("1")).unwrap();
        std::fs::write(input.path().join("b.xml"), bulletin("2")).unwrap();
        std::fs::write(input.path().join("broken.xml"), "<product>").unwrap();
        std::fs::write(input.path().join("readme.txt"), "ignored").unwrap();

        let args = batch_args(input.path().to_path_buf(), Some(output.path().to_path_buf()));
        let stats = run_batch(args, &Config::default(), false, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(stats.bulletins_processed, 2);
        assert_eq!(stats.bulletins_failed, 1);
        assert_eq!(stats.stations_parsed, 2);
        assert_eq!(stats.observations_parsed, 2);
        assert_eq!(stats.output_sizes.len(), 2);

        let export = DatabaseExport::read_json_file(&output.path().join("a.json")).unwrap();
        assert_eq!(export.stations[0].bom_id.as_deref(), Some("1"));
        assert!(!output.path().join("broken.json").exists());
    }

    #[tokio::test]
    async fn test_same_named_bulletins_in_subdirectories_keep_separate_exports() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        for (region, bom_id) in [("vic", "086338"), ("nsw", "066062")] {
            let dir = input.path().join(region);
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join("IDV60920.xml"), bulletin(bom_id)).unwrap();
        }

        let args = batch_args(input.path().to_path_buf(), Some(output.path().to_path_buf()));
        let stats = run_batch(args, &Config::default(), false, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(stats.bulletins_processed, 2);
        assert_eq!(stats.output_sizes.len(), 2);
        assert!(!output.path().join("IDV60920.json").exists());

        for (region, bom_id) in [("vic", "086338"), ("nsw", "066062")] {
            let path = output.path().join(region).join("IDV60920.json");
            let export = DatabaseExport::read_json_file(&path).unwrap();
            assert_eq!(export.stations[0].bom_id.as_deref(), Some(bom_id));
        }
    }

    #[tokio::test]
    async fn test_batch_empty_directory() {
        let input = TempDir::new().unwrap();
        let args = batch_args(input.path().to_path_buf(), None);
        let stats = run_batch(args, &Config::default(), false, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(stats.bulletins_processed, 0);
    }

    #[tokio::test]
    async fn test_cancelled_batch_parses_nothing() {
        let input = TempDir::new().unwrap();
        std::fs::write(input.path().join("a.xml"), bulletin("1")).unwrap();

        let token = CancellationToken::new();
        token.cancel();

        let args = batch_args(input.path().to_path_buf(), None);
        let stats = run_batch(args, &Config::default(), false, token)
            .await
            .unwrap();
        assert_eq!(stats.bulletins_processed, 0);
        assert_eq!(stats.bulletins_failed, 0);
    }
}
