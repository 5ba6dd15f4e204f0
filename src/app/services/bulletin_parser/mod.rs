//! Bulletin parser for BoM XML observation bulletins
//!
//! This module turns one observation bulletin into database-ready records.
//! Document-level problems (broken markup, no root element) fail the whole
//! parse; anything below the station level degrades to absent values, and a
//! station that cannot be read is skipped without aborting the batch.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Parse orchestration and file handling
//! - [`xml_tree`] - Event-driven XML reader building an owned element tree
//! - [`metadata`] - Bulletin metadata (`amoc` block) extraction
//! - [`station_parser`] - Per-station record and latest observation extraction
//! - [`measurement_mapping`] - Static element-code to field-name table
//! - [`field_parsers`] - Null-safe float, text and timestamp helpers
//! - [`stats`] - Parse statistics and skipped-station diagnostics
//!
//! ## Usage
//!
//! ```rust
//! use bom_observations::app::services::bulletin_parser::BulletinParser;
//!
//! # fn example() -> bom_observations::Result<()> {
//! let parser = BulletinParser::new();
//! let (bulletin, stats) = parser.parse_file_with_stats(std::path::Path::new("IDV60920.xml"))?;
//!
//! println!("Parsed {} stations, {} observations ({} skipped)",
//!          bulletin.stations.len(),
//!          bulletin.observations.len(),
//!          stats.stations_skipped);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod measurement_mapping;
pub mod metadata;
pub mod parser;
pub mod station_parser;
pub mod stats;
pub mod xml_tree;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use measurement_mapping::{MeasurementDescriptor, ValueKind};
pub use parser::BulletinParser;
pub use stats::{ParseStats, StationSkip};
