//! JSON serialization of database exports

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

use super::DatabaseExport;
use crate::{Error, Result};

impl DatabaseExport {
    /// Serialize the export to a JSON string
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| Error::serialization("Failed to serialize bulletin export", e))
    }

    /// Write the export as JSON to any writer
    pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> Result<()> {
        let result = if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        };
        result.map_err(|e| Error::serialization("Failed to write bulletin export", e))
    }

    /// Write the export as JSON to a file, creating or truncating it
    pub fn write_json_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            Error::io(format!("Failed to create export file {}", path.display()), e)
        })?;

        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer, pretty)?;
        writer.flush().map_err(|e| {
            Error::io(format!("Failed to flush export file {}", path.display()), e)
        })?;

        info!(
            "Wrote {} stations and {} observations to {}",
            self.summary.station_count,
            self.summary.observation_count,
            path.display()
        );
        Ok(())
    }

    /// Read an export back from any JSON reader
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| Error::serialization("Failed to read bulletin export", e))
    }

    /// Read an export back from a JSON file
    pub fn read_json_file(path: &Path) -> Result<Self> {
        debug!("Reading bulletin export from {}", path.display());
        let file = File::open(path).map_err(|e| {
            Error::io(format!("Failed to open export file {}", path.display()), e)
        })?;
        Self::read_json(BufReader::new(file))
    }
}
