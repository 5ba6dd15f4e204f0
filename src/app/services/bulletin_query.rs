//! Read-only projections over a parsed bulletin
//!
//! These helpers never modify the bulletin; they look records up by bureau
//! station id and join station names onto observations for reporting.

use crate::app::models::{Observation, ParsedBulletin, Station, TemperatureSummary};

impl ParsedBulletin {
    /// Find the first station with the given bureau id
    pub fn station_by_id(&self, bom_id: &str) -> Option<&Station> {
        self.stations
            .iter()
            .find(|station| station.bom_id.as_deref() == Some(bom_id))
    }

    /// All observations recorded for the given bureau id, in document order
    pub fn observations_for_station(&self, bom_id: &str) -> Vec<&Observation> {
        self.observations
            .iter()
            .filter(|observation| observation.bom_id.as_deref() == Some(bom_id))
            .collect()
    }

    /// Temperature readings joined with their station's name
    ///
    /// Observations whose station is not part of the bulletin are left out.
    pub fn temperature_summary(&self) -> Vec<TemperatureSummary> {
        self.observations
            .iter()
            .filter_map(|observation| {
                let station = self.station_by_id(observation.bom_id.as_deref()?)?;
                Some(TemperatureSummary {
                    station_name: station.station_name.clone(),
                    bom_id: observation.bom_id.clone(),
                    temperature: observation.number("temperature_celsius"),
                    apparent_temperature: observation.number("apparent_temperature_celsius"),
                    min_temperature: observation.number("min_temperature_celsius"),
                    max_temperature: observation.number("max_temperature_celsius"),
                    observation_time: observation.observation_time_utc,
                })
            })
            .collect()
    }
}
