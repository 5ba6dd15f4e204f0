//! Summary command: human-readable overview of one bulletin

use crate::app::models::ParsedBulletin;
use crate::app::services::bulletin_parser::{BulletinParser, ParseStats};
use crate::app::services::export::{Table, TableRows};
use crate::cli::args::SummaryArgs;
use crate::cli::commands::shared::ProcessingStats;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use std::fmt::Write;
use std::time::Instant;

/// Run the summary command
pub async fn run_summary(args: SummaryArgs, config: &Config) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    let parser = BulletinParser::with_config(config.parser.clone());
    let limit = args.limit.unwrap_or(config.output.summary_limit);

    let input = args.input.clone();
    let (bulletin, parse_stats) =
        tokio::task::spawn_blocking(move || parser.parse_file_with_stats(&input))
            .await
            .map_err(|e| Error::io("Parse task failed", std::io::Error::other(e)))??;

    print!("{}", render_summary(&bulletin, &parse_stats, limit));

    let mut stats = ProcessingStats::default();
    stats.record_bulletin(&parse_stats);
    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

/// Render the bulletin summary as colored text
pub fn render_summary(bulletin: &ParsedBulletin, stats: &ParseStats, limit: usize) -> String {
    let metadata = &bulletin.metadata;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "\n{}", "Bulletin Summary".bright_green().bold());
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(
        out,
        "  {} {}",
        "Data source:".bright_cyan(),
        or_na(metadata.sender.clone())
    );
    let _ = writeln!(
        out,
        "  {} {}",
        "Report time:".bright_cyan(),
        or_na(metadata.issue_time_local.map(|t| t.to_rfc3339()))
    );
    let _ = writeln!(
        out,
        "  {} {}",
        "Report ID:".bright_cyan(),
        or_na(metadata.report_id.clone())
    );
    let _ = writeln!(
        out,
        "  {} {} stations, {} observations",
        "Records:".bright_cyan(),
        bulletin.station_count(),
        bulletin.observation_count()
    );
    if !stats.is_complete() {
        let _ = writeln!(
            out,
            "  {} {} station elements could not be read",
            "Skipped:".bright_red(),
            stats.stations_skipped
        );
    }

    let _ = writeln!(out, "\n{}", "Temperature overview".bright_yellow());
    let temperatures = bulletin.temperature_summary();
    for (i, entry) in temperatures.iter().take(limit).enumerate() {
        let time = entry
            .observation_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let temperature = entry
            .temperature
            .map(|t| format!("{}°C", t))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "  {}. {}: {} at {}",
            i + 1,
            entry.station_name.as_deref().unwrap_or("unknown").bold(),
            temperature,
            time
        );
    }
    if temperatures.len() > limit {
        let _ = writeln!(out, "  ... and {} more stations", temperatures.len() - limit);
    }

    if let Some(station) = bulletin.stations.first() {
        let location = station
            .location()
            .map(|(lat, lon)| format!("{:.2}, {:.2}", lat, lon))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(out, "\n{}", "Sample station".bright_yellow());
        let _ = writeln!(
            out,
            "  {} ({}) at {}",
            station.station_name.as_deref().unwrap_or("unknown"),
            station.bom_id.as_deref().unwrap_or("N/A"),
            location
        );
    }

    let _ = writeln!(out, "\n{}", "Database tables".bright_yellow());
    for table in Table::ALL {
        let rows = TableRows::from_bulletin(bulletin, table);
        let _ = writeln!(
            out,
            "  {:<14} {} columns, {} rows",
            format!("{}:", table),
            rows.columns.len(),
            rows.len()
        );
    }

    out
}
