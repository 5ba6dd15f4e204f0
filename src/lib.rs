//! BoM Observations Library
//!
//! A Rust library for converting Australian Bureau of Meteorology (BoM) XML
//! observation bulletins into normalized, database-ready records.
//!
//! This library provides tools for:
//! - Parsing a bulletin into one metadata record, one record per station and
//!   one record per station's latest observation
//! - Normalizing bureau timestamps to timezone-aware instants
//! - Mapping bureau element codes onto stable measurement field names
//! - Read-only projections over a parsed bulletin (lookups, temperature summaries)
//! - Exporting results as JSON or as tabular rows ready for SQL inserts
//!
//! ```rust
//! use bom_observations::BulletinParser;
//!
//! let xml = r#"<product>
//!   <amoc><identifier>IDV60920</identifier></amoc>
//!   <observations>
//!     <station bom-id="086338" stn-name="MELBOURNE (OLYMPIC PARK)" lat="-37.81" lon="144.98">
//!       <period index="0" time-utc="2024-01-01T10:00:00+00:00">
//!         <level index="0" type="surface">
//!           <element type="air_temperature" units="Celsius">15.4</element>
//!         </level>
//!       </period>
//!     </station>
//!   </observations>
//! </product>"#;
//!
//! let bulletin = BulletinParser::new().parse_str(xml)?;
//! assert_eq!(bulletin.stations.len(), 1);
//! assert_eq!(bulletin.observations[0].number("temperature_celsius"), Some(15.4));
//! # Ok::<(), bom_observations::Error>(())
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bulletin_parser;
        pub mod bulletin_query;
        pub mod export;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    BulletinMetadata, FieldValue, Observation, ParsedBulletin, Station, TemperatureSummary,
};
pub use app::services::bulletin_parser::BulletinParser;
pub use config::Config;

/// Result type alias for bulletin processing
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bulletin parsing and export operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input is not a well-formed bulletin document
    #[error("Malformed bulletin: {detail}")]
    Malformed { detail: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a malformed document error
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed {
            detail: detail.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the error means the document itself could not be read as a bulletin
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        Self::Malformed {
            detail: error.to_string(),
        }
    }
}
