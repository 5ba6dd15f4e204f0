//! Application constants for the BoM observations parser
//!
//! This module contains the element and attribute names of the bureau's
//! observation bulletin schema plus default values used across the crate.

// =============================================================================
// Bulletin Structure
// =============================================================================

/// Element names in the observation bulletin
pub mod elements {
    /// Metadata container under the document root
    pub const AMOC: &str = "amoc";
    pub const IDENTIFIER: &str = "identifier";
    pub const ISSUE_TIME_UTC: &str = "issue-time-utc";
    pub const ISSUE_TIME_LOCAL: &str = "issue-time-local";
    pub const SENT_TIME: &str = "sent-time";
    pub const SOURCE: &str = "source";
    pub const SENDER: &str = "sender";
    pub const OFFICE: &str = "office";
    pub const REGION: &str = "region";
    pub const STATUS: &str = "status";
    pub const SERVICE: &str = "service";
    pub const PRODUCT_TYPE: &str = "product-type";

    /// Station container under the document root
    pub const OBSERVATIONS: &str = "observations";
    pub const STATION: &str = "station";
    pub const PERIOD: &str = "period";
    pub const LEVEL: &str = "level";
    pub const ELEMENT: &str = "element";
}

/// Attribute names in the observation bulletin
pub mod attributes {
    // Station attributes
    pub const WMO_ID: &str = "wmo-id";
    pub const BOM_ID: &str = "bom-id";
    pub const STATION_NAME: &str = "stn-name";
    pub const DESCRIPTION: &str = "description";
    pub const LATITUDE: &str = "lat";
    pub const LONGITUDE: &str = "lon";
    pub const HEIGHT: &str = "stn-height";
    pub const TIMEZONE: &str = "tz";
    pub const TYPE: &str = "type";
    pub const FORECAST_DISTRICT_ID: &str = "forecast-district-id";

    // Period attributes
    pub const INDEX: &str = "index";
    pub const TIME_UTC: &str = "time-utc";
    pub const TIME_LOCAL: &str = "time-local";
    pub const WIND_SOURCE: &str = "wind-src";
}

// =============================================================================
// Parser Defaults
// =============================================================================

/// Level type holding the surface measurements
pub const DEFAULT_SURFACE_LEVEL_TYPE: &str = "surface";

/// Period index of the most recent reading
pub const DEFAULT_LATEST_PERIOD_INDEX: &str = "0";

/// Unit suffixes stripped from an extremum field to build its time field name
pub const EXTREMUM_UNIT_SUFFIXES: &[&str] = &["_celsius", "_kmh", "_knots"];

/// Suffixes appended to an extremum time base
pub const TIME_UTC_SUFFIX: &str = "_time_utc";
pub const TIME_LOCAL_SUFFIX: &str = "_time_local";

// =============================================================================
// Export Defaults
// =============================================================================

/// Observation columns stored as integers in the database schema
pub const INTEGER_COLUMNS: &[&str] = &["wind_direction_degrees", "cloud_oktas"];

/// Number of stations listed by the summary command
pub const DEFAULT_SUMMARY_LIMIT: usize = 5;

/// File name pattern for bulletins picked up by the batch command
pub const DEFAULT_BULLETIN_PATTERN: &str = "*.xml";

/// Directory name used under the user config directory
pub const CONFIG_DIR_NAME: &str = "bom-observations";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
