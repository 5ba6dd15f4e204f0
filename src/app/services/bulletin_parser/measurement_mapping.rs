//! Measurement mapping from bureau element codes to normalized field names
//!
//! The table below is the single source of truth for the observation schema.
//! It is a strict allow-list: element codes that are not listed are ignored.

use crate::constants::{EXTREMUM_UNIT_SUFFIXES, TIME_LOCAL_SUFFIX, TIME_UTC_SUFFIX};

/// How an element's text is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Kept as bureau text with surrounding whitespace trimmed
    Text,
    /// Coerced to a float, absent when coercion fails
    Number,
}

/// Declarative description of one measurement element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementDescriptor {
    /// Bureau element type code (the `type` attribute)
    pub code: &'static str,

    /// Normalized output field name
    pub field: &'static str,

    /// Storage kind for the element text
    pub kind: ValueKind,

    /// Whether the element reports a time of occurrence
    pub extremum: bool,
}

impl MeasurementDescriptor {
    const fn number(code: &'static str, field: &'static str) -> Self {
        Self {
            code,
            field,
            kind: ValueKind::Number,
            extremum: false,
        }
    }

    const fn text(code: &'static str, field: &'static str) -> Self {
        Self {
            code,
            field,
            kind: ValueKind::Text,
            extremum: false,
        }
    }

    const fn extremum(code: &'static str, field: &'static str) -> Self {
        Self {
            code,
            field,
            kind: ValueKind::Number,
            extremum: true,
        }
    }

    /// Field names for the UTC and local time of an extremum
    ///
    /// The base is the field name without its unit suffix, so
    /// `max_temperature_celsius` gives `max_temperature_time_utc`.
    pub fn time_fields(&self) -> Option<(String, String)> {
        self.extremum.then(|| {
            let base = derive_time_base(self.field);
            (
                format!("{}{}", base, TIME_UTC_SUFFIX),
                format!("{}{}", base, TIME_LOCAL_SUFFIX),
            )
        })
    }
}

/// All known measurement element types
pub static MEASUREMENTS: &[MeasurementDescriptor] = &[
    // Temperature measurements
    MeasurementDescriptor::number("air_temperature", "temperature_celsius"),
    MeasurementDescriptor::number("apparent_temp", "apparent_temperature_celsius"),
    MeasurementDescriptor::number("dew_point", "dew_point_celsius"),
    MeasurementDescriptor::extremum("maximum_air_temperature", "max_temperature_celsius"),
    MeasurementDescriptor::extremum("minimum_air_temperature", "min_temperature_celsius"),
    // Pressure measurements
    MeasurementDescriptor::number("pres", "station_pressure_hpa"),
    MeasurementDescriptor::number("msl_pres", "sea_level_pressure_hpa"),
    MeasurementDescriptor::number("qnh_pres", "qnh_pressure_hpa"),
    // Wind measurements
    MeasurementDescriptor::number("wind_spd_kmh", "wind_speed_kmh"),
    MeasurementDescriptor::number("wind_spd", "wind_speed_knots"),
    MeasurementDescriptor::text("wind_dir", "wind_direction"),
    MeasurementDescriptor::number("wind_dir_deg", "wind_direction_degrees"),
    MeasurementDescriptor::number("gust_kmh", "wind_gust_kmh"),
    MeasurementDescriptor::number("wind_gust_spd", "wind_gust_knots"),
    MeasurementDescriptor::extremum("maximum_gust_kmh", "max_gust_kmh"),
    MeasurementDescriptor::extremum("maximum_gust_spd", "max_gust_knots"),
    MeasurementDescriptor::text("maximum_gust_dir", "max_gust_direction"),
    // Precipitation
    MeasurementDescriptor::number("rain_hour", "rainfall_1hr_mm"),
    MeasurementDescriptor::number("rain_ten", "rainfall_10min_mm"),
    MeasurementDescriptor::number("rainfall", "rainfall_period_mm"),
    MeasurementDescriptor::number("rainfall_24hr", "rainfall_24hr_mm"),
    // Other measurements
    MeasurementDescriptor::number("rel-humidity", "relative_humidity_percent"),
    MeasurementDescriptor::number("vis_km", "visibility_km"),
    MeasurementDescriptor::text("cloud", "cloud_description"),
    MeasurementDescriptor::number("cloud_oktas", "cloud_oktas"),
    MeasurementDescriptor::number("delta_t", "delta_t_celsius"),
];

/// Look up the descriptor for a bureau element code
pub fn lookup(code: &str) -> Option<&'static MeasurementDescriptor> {
    MEASUREMENTS.iter().find(|descriptor| descriptor.code == code)
}

/// Derive the extremum time base by stripping the unit suffix from a field name
pub fn derive_time_base(field: &str) -> &str {
    EXTREMUM_UNIT_SUFFIXES
        .iter()
        .find_map(|suffix| field.strip_suffix(suffix))
        .unwrap_or(field)
}

/// Every output field name the table can produce, in table order
pub fn known_fields() -> Vec<String> {
    let mut fields = Vec::new();
    for descriptor in MEASUREMENTS {
        if !fields.iter().any(|f: &String| f == descriptor.field) {
            fields.push(descriptor.field.to_string());
        }
        if let Some((utc, local)) = descriptor.time_fields() {
            for name in [utc, local] {
                if !fields.contains(&name) {
                    fields.push(name);
                }
            }
        }
    }
    fields
}
