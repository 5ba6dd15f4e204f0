//! Tabular rows for parameterized SQL inserts
//!
//! Each table becomes a column list plus one positional row per record.
//! Observations are sparse, so the columns are the union of the keys of all
//! records in first-seen order and a record lacking a column gets `null`.
//! Measurement columns of an observation follow the measurement table order,
//! so extremum time columns sit next to their value.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::app::models::{BulletinMetadata, FieldValue, Observation, ParsedBulletin, Station};
use crate::app::services::bulletin_parser::measurement_mapping::known_fields;
use crate::constants::INTEGER_COLUMNS;

/// Tables a bulletin is loaded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Metadata,
    Stations,
    Observations,
}

impl Table {
    /// All tables in load order
    pub const ALL: [Table; 3] = [Table::Metadata, Table::Stations, Table::Observations];

    /// Database table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Metadata => "metadata",
            Table::Stations => "stations",
            Table::Observations => "observations",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Column list plus positional rows for one table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableRows {
    /// Build the rows of one table from a parsed bulletin
    pub fn from_bulletin(bulletin: &ParsedBulletin, table: Table) -> Self {
        match table {
            Table::Metadata => Self::from_cells(std::iter::once(metadata_cells(&bulletin.metadata))),
            Table::Stations => Self::from_cells(bulletin.stations.iter().map(station_cells)),
            Table::Observations => {
                let order = known_fields();
                Self::from_cells(
                    bulletin
                        .observations
                        .iter()
                        .map(|observation| observation_cells(observation, &order)),
                )
            }
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of a named column in a given row
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }

    fn from_cells(records: impl Iterator<Item = Vec<(String, Value)>>) -> Self {
        let records: Vec<_> = records.collect();

        let mut columns: Vec<String> = Vec::new();
        for cells in &records {
            for (column, _) in cells {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut cells| {
                columns
                    .iter()
                    .map(|column| {
                        cells
                            .iter()
                            .position(|(name, _)| name == column)
                            .map(|i| cells.swap_remove(i).1)
                            .unwrap_or(Value::Null)
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }
}

fn text(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}

fn number(value: Option<f64>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn time(value: Option<DateTime<FixedOffset>>) -> Value {
    value
        .map(|t| Value::String(t.to_rfc3339()))
        .unwrap_or(Value::Null)
}

fn cell(column: &str, value: Value) -> (String, Value) {
    (column.to_string(), value)
}

fn metadata_cells(metadata: &BulletinMetadata) -> Vec<(String, Value)> {
    vec![
        cell("report_id", text(&metadata.report_id)),
        cell("issue_time_utc", time(metadata.issue_time_utc)),
        cell("issue_time_local", time(metadata.issue_time_local)),
        cell("sent_time", time(metadata.sent_time)),
        cell("sender", text(&metadata.sender)),
        cell("office", text(&metadata.office)),
        cell("region", text(&metadata.region)),
        cell("status", text(&metadata.status)),
        cell("service", text(&metadata.service)),
        cell("product_type", text(&metadata.product_type)),
    ]
}

fn station_cells(station: &Station) -> Vec<(String, Value)> {
    vec![
        cell("wmo_id", text(&station.wmo_id)),
        cell("bom_id", text(&station.bom_id)),
        cell("station_name", text(&station.station_name)),
        cell("station_description", text(&station.station_description)),
        cell("latitude", number(station.latitude)),
        cell("longitude", number(station.longitude)),
        cell("height_meters", number(station.height_meters)),
        cell("timezone", text(&station.timezone)),
        cell("station_type", text(&station.station_type)),
        cell("forecast_district_id", text(&station.forecast_district_id)),
    ]
}

fn observation_cells(observation: &Observation, order: &[String]) -> Vec<(String, Value)> {
    let mut cells = vec![
        cell("bom_id", text(&observation.bom_id)),
        cell("wmo_id", text(&observation.wmo_id)),
        cell("station_name", text(&observation.station_name)),
        cell("observation_time_utc", time(observation.observation_time_utc)),
        cell("observation_time_local", time(observation.observation_time_local)),
        cell("wind_source", text(&observation.wind_source)),
    ];

    // Fields outside the table keep map order after the known ones
    let mut measurements: Vec<_> = observation.measurements.iter().collect();
    measurements.sort_by_key(|(field, _)| {
        order
            .iter()
            .position(|known| known == *field)
            .unwrap_or(order.len())
    });
    for (field, value) in measurements {
        cells.push(cell(field, measurement_value(field, value.as_ref())));
    }
    cells
}

fn measurement_value(field: &str, value: Option<&FieldValue>) -> Value {
    match value {
        None => Value::Null,
        Some(FieldValue::Number(n)) if INTEGER_COLUMNS.contains(&field) => {
            Value::from(n.round() as i64)
        }
        Some(FieldValue::Number(n)) => Value::from(*n),
        Some(FieldValue::Time(t)) => Value::String(t.to_rfc3339()),
        Some(FieldValue::Text(s)) => Value::String(s.clone()),
    }
}
