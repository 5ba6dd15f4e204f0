//! Core bulletin parser implementation
//!
//! This module provides the parse orchestration: decoding the input, building
//! the element tree, and folding over station elements while collecting
//! statistics.

use std::path::Path;
use tracing::{debug, info, warn};

use super::metadata::extract_metadata;
use super::station_parser::{StationOutcome, parse_station};
use super::stats::ParseStats;
use super::xml_tree::XmlElement;
use crate::app::models::ParsedBulletin;
use crate::config::ParserConfig;
use crate::constants::elements;
use crate::{Error, Result};

const UTF8_BOM: &str = "\u{feff}";

/// Parser for BoM XML observation bulletins
///
/// The parser holds only its immutable configuration, so a single instance
/// can be shared across threads and reused for any number of bulletins.
#[derive(Debug, Clone, Default)]
pub struct BulletinParser {
    config: ParserConfig,
}

impl BulletinParser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom settings
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parser settings in use
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a bulletin from raw bytes
    pub fn parse(&self, input: &[u8]) -> Result<ParsedBulletin> {
        self.parse_with_stats(input).map(|(bulletin, _)| bulletin)
    }

    /// Parse a bulletin from an in-memory string
    pub fn parse_str(&self, input: &str) -> Result<ParsedBulletin> {
        self.parse_str_with_stats(input).map(|(bulletin, _)| bulletin)
    }

    /// Parse a bulletin file
    pub fn parse_file(&self, path: &Path) -> Result<ParsedBulletin> {
        self.parse_file_with_stats(path).map(|(bulletin, _)| bulletin)
    }

    /// Parse raw bytes and return statistics alongside the records
    pub fn parse_with_stats(&self, input: &[u8]) -> Result<(ParsedBulletin, ParseStats)> {
        let text = std::str::from_utf8(input)
            .map_err(|e| Error::malformed(format!("bulletin is not valid UTF-8: {}", e)))?;
        self.parse_str_with_stats(text)
    }

    /// Parse a string and return statistics alongside the records
    pub fn parse_str_with_stats(&self, input: &str) -> Result<(ParsedBulletin, ParseStats)> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        let root = XmlElement::parse_document(input)?;
        debug!("Parsed document tree with root <{}>", root.name());

        let (bulletin, stats) = self.walk_document(&root);

        info!(
            "Parsed bulletin {}: {} stations, {} observations, {} skipped",
            bulletin.metadata.report_id.as_deref().unwrap_or("<unknown>"),
            stats.stations_parsed,
            stats.observations_parsed,
            stats.stations_skipped
        );

        Ok((bulletin, stats))
    }

    /// Parse a bulletin file and return statistics alongside the records
    pub fn parse_file_with_stats(&self, path: &Path) -> Result<(ParsedBulletin, ParseStats)> {
        info!("Parsing bulletin file: {}", path.display());

        let content = std::fs::read(path).map_err(|e| {
            Error::io(format!("Failed to read bulletin {}", path.display()), e)
        })?;

        self.parse_with_stats(&content)
    }

    /// Walk a parsed document tree, folding over its station elements
    fn walk_document(&self, root: &XmlElement) -> (ParsedBulletin, ParseStats) {
        let mut bulletin = ParsedBulletin {
            metadata: extract_metadata(root),
            ..Default::default()
        };
        let mut stats = ParseStats::new();

        let Some(observations) = root.child(elements::OBSERVATIONS) else {
            warn!("No {} block found in bulletin", elements::OBSERVATIONS);
            return (bulletin, stats);
        };

        for (index, element) in observations.children_named(elements::STATION).enumerate() {
            stats.stations_seen += 1;

            match parse_station(element, &self.config) {
                StationOutcome::Parsed {
                    station,
                    observation,
                    unknown_elements,
                } => {
                    stats.stations_parsed += 1;
                    stats.unknown_elements += unknown_elements;
                    bulletin.stations.push(station);

                    match observation {
                        Some(observation) => {
                            stats.observations_parsed += 1;
                            bulletin.observations.push(observation);
                        }
                        None => stats.stations_without_observation += 1,
                    }
                }
                StationOutcome::Skipped {
                    station_name,
                    reason,
                } => {
                    warn!(
                        "Skipping station {} ({}): {}",
                        index,
                        station_name.as_deref().unwrap_or("unknown"),
                        reason
                    );
                    stats.record_skip(index, station_name, reason);
                }
            }
        }

        (bulletin, stats)
    }
}
