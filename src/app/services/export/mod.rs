//! Export of parsed bulletins for database loading
//!
//! A parsed bulletin leaves the crate in one of two shapes:
//!
//! - [`DatabaseExport`] - the three record collections plus a summary block,
//!   written and re-read as JSON (see [`json`])
//! - [`TableRows`] - one table as a column list and positional rows, ready
//!   for a parameterized SQL insert (see [`table`])
//!
//! # Basic Usage
//!
//! ```rust
//! use bom_observations::BulletinParser;
//! use bom_observations::app::services::export::{DatabaseExport, Table, TableRows};
//!
//! # fn example(xml: &str) -> bom_observations::Result<()> {
//! let bulletin = BulletinParser::new().parse_str(xml)?;
//!
//! let export = DatabaseExport::from_bulletin(&bulletin);
//! let json = export.to_json_string(true)?;
//!
//! let table = TableRows::from_bulletin(&bulletin, Table::Observations);
//! println!("{} columns, {} rows, {} bytes of JSON", table.columns.len(), table.rows.len(), json.len());
//! # Ok(())
//! # }
//! ```

pub mod json;
pub mod table;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::app::models::{BulletinMetadata, Observation, ParsedBulletin, Station};

pub use table::{Table, TableRows};

/// Counts and identifiers describing an export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub station_count: usize,
    pub observation_count: usize,
    pub report_id: Option<String>,
    pub issue_time: Option<DateTime<FixedOffset>>,
}

/// Full bulletin export as loaded into the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseExport {
    pub metadata: BulletinMetadata,
    pub stations: Vec<Station>,
    pub observations: Vec<Observation>,
    pub summary: ExportSummary,
}

impl DatabaseExport {
    /// Build an export from a parsed bulletin
    pub fn from_bulletin(bulletin: &ParsedBulletin) -> Self {
        Self {
            metadata: bulletin.metadata.clone(),
            stations: bulletin.stations.clone(),
            observations: bulletin.observations.clone(),
            summary: ExportSummary {
                station_count: bulletin.station_count(),
                observation_count: bulletin.observation_count(),
                report_id: bulletin.metadata.report_id.clone(),
                issue_time: bulletin.metadata.issue_time_utc,
            },
        }
    }

    /// Convert back into a parsed bulletin, dropping the summary block
    pub fn into_bulletin(self) -> ParsedBulletin {
        ParsedBulletin {
            metadata: self.metadata,
            stations: self.stations,
            observations: self.observations,
        }
    }
}

impl From<&ParsedBulletin> for DatabaseExport {
    fn from(bulletin: &ParsedBulletin) -> Self {
        Self::from_bulletin(bulletin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_match_records() {
        let bulletin = ParsedBulletin {
            metadata: BulletinMetadata {
                report_id: Some("IDV60920".to_string()),
                issue_time_utc: DateTime::parse_from_rfc3339("2024-01-15T10:36:00+00:00").ok(),
                ..Default::default()
            },
            stations: vec![Station::default(), Station::default()],
            observations: vec![Observation::default()],
        };

        let export = DatabaseExport::from_bulletin(&bulletin);
        assert_eq!(export.summary.station_count, 2);
        assert_eq!(export.summary.observation_count, 1);
        assert_eq!(export.summary.report_id.as_deref(), Some("IDV60920"));
        assert_eq!(export.summary.issue_time, bulletin.metadata.issue_time_utc);

        assert_eq!(export.into_bulletin(), bulletin);
    }
}
