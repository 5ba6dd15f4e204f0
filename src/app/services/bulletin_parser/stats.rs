//! Parsing statistics for bulletin processing
//!
//! Skipped stations are not errors to the caller; they are recorded here so
//! operators can still see them.

use serde::{Deserialize, Serialize};

/// Why a station element contributed no records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSkip {
    /// Position of the station element among its siblings (0-based)
    pub index: usize,

    /// Station name when it could be read
    pub station_name: Option<String>,

    /// Human-readable reason
    pub reason: String,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Station elements encountered
    pub stations_seen: usize,

    /// Station records produced
    pub stations_parsed: usize,

    /// Station elements skipped because they could not be read
    pub stations_skipped: usize,

    /// Stations without a readable latest period
    pub stations_without_observation: usize,

    /// Observation records produced
    pub observations_parsed: usize,

    /// Measurement elements whose type code is not in the mapping table
    pub unknown_elements: usize,

    /// Details of every skipped station
    pub skipped: Vec<StationSkip>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped station
    pub fn record_skip(&mut self, index: usize, station_name: Option<String>, reason: String) {
        self.stations_skipped += 1;
        self.skipped.push(StationSkip {
            index,
            station_name,
            reason,
        });
    }

    /// Share of station elements that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.stations_seen == 0 {
            0.0
        } else {
            (self.stations_parsed as f64 / self.stations_seen as f64) * 100.0
        }
    }

    /// True when no station had to be skipped
    pub fn is_complete(&self) -> bool {
        self.stations_skipped == 0
    }
}
