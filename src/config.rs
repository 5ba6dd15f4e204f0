//! Configuration management and validation.
//!
//! Provides configuration structures for the bulletin parser and for the
//! export/reporting side of the CLI, loaded from an optional TOML file.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LATEST_PERIOD_INDEX, DEFAULT_SUMMARY_LIMIT,
    DEFAULT_SURFACE_LEVEL_TYPE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bulletin parser settings
    pub parser: ParserConfig,

    /// Export and reporting settings
    pub output: OutputConfig,
}

/// Settings that shape how a bulletin is walked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Skip station elements that carry no `bom-id` attribute (off by default)
    pub require_bom_id: bool,

    /// `type` attribute of the level holding surface measurements
    pub surface_level_type: String,

    /// `index` attribute of the most recent period
    pub latest_period_index: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            require_bom_id: false,
            surface_level_type: DEFAULT_SURFACE_LEVEL_TYPE.to_string(),
            latest_period_index: DEFAULT_LATEST_PERIOD_INDEX.to_string(),
        }
    }
}

impl ParserConfig {
    /// Skip stations that have no `bom-id` attribute
    pub fn require_bom_id(mut self) -> Self {
        self.require_bom_id = true;
        self
    }

    /// Read measurements from a different level type
    pub fn with_surface_level_type(mut self, level_type: impl Into<String>) -> Self {
        self.surface_level_type = level_type.into();
        self
    }

    /// Treat a different period index as the latest reading
    pub fn with_latest_period_index(mut self, index: impl Into<String>) -> Self {
        self.latest_period_index = index.into();
        self
    }

    /// Validate parser settings
    pub fn validate(&self) -> Result<()> {
        if self.surface_level_type.trim().is_empty() {
            return Err(Error::configuration("surface_level_type cannot be empty"));
        }
        if self.latest_period_index.trim().is_empty() {
            return Err(Error::configuration("latest_period_index cannot be empty"));
        }
        Ok(())
    }
}

/// Export and reporting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON exports
    pub pretty_json: bool,

    /// Number of stations listed by the summary command
    pub summary_limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

impl Config {
    /// Default config file location (`<config_dir>/bom-observations/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration: explicit file, else the default file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replace the parser settings
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Set the number of stations listed by the summary command
    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.output.summary_limit = limit;
        self
    }

    /// Enable or disable pretty JSON output
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.output.pretty_json = pretty;
        self
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        if self.output.summary_limit == 0 {
            return Err(Error::configuration("summary_limit must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.parser.require_bom_id);
        assert_eq!(config.parser.surface_level_type, "surface");
        assert_eq!(config.parser.latest_period_index, "0");
        assert!(config.output.pretty_json);
        assert_eq!(config.output.summary_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
[parser]
require_bom_id = true

[output]
summary_limit = 10
"#,
        )
        .unwrap();

        assert!(config.parser.require_bom_id);
        assert_eq!(config.parser.surface_level_type, "surface");
        assert_eq!(config.output.summary_limit, 10);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_toml_str("[output]\nsummary_limit = 0\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = Config::from_toml_str("[parser]\nsurface_level_type = \"  \"\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = Config::from_toml_str("[parser]\nrequire_bom_id = \"yes\"\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty_json = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.output.pretty_json);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/bom-observations.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_parser(
                ParserConfig::default()
                    .require_bom_id()
                    .with_surface_level_type("upper")
                    .with_latest_period_index("1"),
            )
            .with_summary_limit(3)
            .with_pretty_json(false);

        assert!(config.parser.require_bom_id);
        assert_eq!(config.parser.surface_level_type, "upper");
        assert_eq!(config.parser.latest_period_index, "1");
        assert_eq!(config.output.summary_limit, 3);
        assert!(!config.output.pretty_json);
    }
}
