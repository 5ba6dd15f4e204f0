//! Data models for bulletin processing
//!
//! This module contains the core data structures produced by the bulletin parser:
//! bulletin metadata, station records and the latest observation per station.
//! Every record is a plain, serializable value shaped for key-based upserts.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Measurement Values
// =============================================================================

/// A single normalized measurement value
///
/// Serialized untagged so an exported observation reads like a database row.
/// Deserialization tries the variants in declaration order: numbers first,
/// then RFC 3339 timestamps, then free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric reading (temperature, pressure, speed, rainfall, ...)
    Number(f64),

    /// Time at which an extremum occurred
    Time(DateTime<FixedOffset>),

    /// Trimmed bureau text (wind direction, cloud description)
    Text(String),
}

impl FieldValue {
    /// Get the value as a number if it is numeric
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the value as text if it is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Get the value as a timestamp if it is a time
    pub fn as_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            FieldValue::Time(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Time(value) => write!(f, "{}", value.to_rfc3339()),
            FieldValue::Text(value) => write!(f, "{}", value),
        }
    }
}

// =============================================================================
// Bulletin Metadata
// =============================================================================

/// Bulletin-level metadata taken from the `amoc` block
///
/// All fields are optional; a bulletin without an `amoc` block produces a
/// record where every field is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulletinMetadata {
    /// Product identifier, e.g. "IDV60920"
    pub report_id: Option<String>,

    /// Issue time in UTC
    pub issue_time_utc: Option<DateTime<FixedOffset>>,

    /// Issue time in the bulletin's local timezone
    pub issue_time_local: Option<DateTime<FixedOffset>>,

    /// Time the bulletin was sent
    pub sent_time: Option<DateTime<FixedOffset>>,

    /// Issuing agency, e.g. "Australian Government Bureau of Meteorology"
    pub sender: Option<String>,

    /// Issuing office, e.g. "VICRO"
    pub office: Option<String>,

    /// Region covered by the bulletin
    pub region: Option<String>,

    /// Bulletin status ("O" for operational)
    pub status: Option<String>,

    /// Service code, e.g. "WSO"
    pub service: Option<String>,

    /// Product type code, e.g. "O"
    pub product_type: Option<String>,
}

impl BulletinMetadata {
    /// Key used to upsert metadata rows
    pub fn upsert_key(&self) -> Option<&str> {
        self.report_id.as_deref()
    }
}

// =============================================================================
// Station Record
// =============================================================================

/// Station record as reported in the bulletin
///
/// Attribute values are passed through unchanged apart from float parsing
/// of the coordinates and height.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// WMO station number
    pub wmo_id: Option<String>,

    /// Bureau station number - natural key for station upserts
    pub bom_id: Option<String>,

    /// Station name, e.g. "MELBOURNE (OLYMPIC PARK)"
    pub station_name: Option<String>,

    /// Free-text station description
    pub station_description: Option<String>,

    /// Latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    pub longitude: Option<f64>,

    /// Station elevation above sea level in meters
    pub height_meters: Option<f64>,

    /// Timezone code, e.g. "Australia/Melbourne"
    pub timezone: Option<String>,

    /// Station type, e.g. "AWS"
    pub station_type: Option<String>,

    /// Forecast district identifier
    pub forecast_district_id: Option<String>,
}

impl Station {
    /// Key used to upsert station rows
    pub fn upsert_key(&self) -> Option<&str> {
        self.bom_id.as_deref()
    }

    /// Get station location as (latitude, longitude) when both are known
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

// =============================================================================
// Observation Record
// =============================================================================

/// Latest observation for a station
///
/// The fixed part identifies the station and the reading time; the
/// measurement part is sparse and depends on which element types the
/// bulletin reported for this station. A measurement key mapped to `None`
/// means the element was reported but its value could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Bureau station number (foreign key to [`Station::bom_id`])
    pub bom_id: Option<String>,

    /// WMO station number
    pub wmo_id: Option<String>,

    /// Station name (denormalized for no-join access)
    pub station_name: Option<String>,

    /// Observation time in UTC
    pub observation_time_utc: Option<DateTime<FixedOffset>>,

    /// Observation time in the station's local timezone
    pub observation_time_local: Option<DateTime<FixedOffset>>,

    /// Wind measurement source flag
    pub wind_source: Option<String>,

    /// Measurements keyed by normalized field name
    #[serde(flatten)]
    pub measurements: BTreeMap<String, Option<FieldValue>>,
}

impl Observation {
    /// Create an empty observation stamped with the station's identity
    pub fn for_station(station: &Station) -> Self {
        Self {
            bom_id: station.bom_id.clone(),
            wmo_id: station.wmo_id.clone(),
            station_name: station.station_name.clone(),
            ..Default::default()
        }
    }

    /// Key used to upsert observation rows
    pub fn upsert_key(&self) -> Option<(&str, DateTime<FixedOffset>)> {
        match (self.bom_id.as_deref(), self.observation_time_utc) {
            (Some(bom_id), Some(time)) => Some((bom_id, time)),
            _ => None,
        }
    }

    /// Store a measurement, replacing any earlier value for the same field
    pub fn insert_measurement(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        self.measurements.insert(field.into(), value);
    }

    /// Check whether the bulletin reported this field (even if unreadable)
    pub fn has_field(&self, field: &str) -> bool {
        self.measurements.contains_key(field)
    }

    /// Get a measurement value by field name
    pub fn measurement(&self, field: &str) -> Option<&FieldValue> {
        self.measurements.get(field).and_then(Option::as_ref)
    }

    /// Get a numeric measurement by field name
    pub fn number(&self, field: &str) -> Option<f64> {
        self.measurement(field).and_then(FieldValue::as_number)
    }

    /// Get a text measurement by field name
    pub fn text(&self, field: &str) -> Option<&str> {
        self.measurement(field).and_then(FieldValue::as_text)
    }

    /// Get a timestamp measurement by field name
    pub fn time(&self, field: &str) -> Option<DateTime<FixedOffset>> {
        self.measurement(field).and_then(FieldValue::as_time)
    }

    /// Number of measurement fields reported for this observation
    pub fn measurement_count(&self) -> usize {
        self.measurements.len()
    }
}

// =============================================================================
// Parse Result
// =============================================================================

/// Everything extracted from one bulletin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedBulletin {
    /// Bulletin metadata
    pub metadata: BulletinMetadata,

    /// Station records in document order
    pub stations: Vec<Station>,

    /// Latest observation per station, in document order
    pub observations: Vec<Observation>,
}

impl ParsedBulletin {
    /// Number of station records
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of observation records
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }
}

/// Temperature-only view joining the station name onto an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub station_name: Option<String>,
    pub bom_id: Option<String>,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub observation_time: Option<DateTime<FixedOffset>>,
}
