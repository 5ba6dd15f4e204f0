//! Station element parsing for observation bulletins
//!
//! This module handles one `station` element at a time: its attributes become
//! a [`Station`], its latest period becomes an [`Observation`]. A station that
//! cannot be read is reported as skipped and never aborts the bulletin.

use quick_xml::escape::EscapeError;
use tracing::trace;

use super::field_parsers::{parse_float, parse_text, parse_timestamp};
use super::measurement_mapping::{self, ValueKind};
use super::xml_tree::XmlElement;
use crate::app::models::{FieldValue, Observation, Station};
use crate::config::ParserConfig;
use crate::constants::{attributes, elements};

/// Reasons a station element contributes no records
#[derive(thiserror::Error, Debug)]
pub enum StationError {
    /// An attribute value holds an escape sequence that cannot be decoded
    #[error("attribute '{attribute}' could not be decoded: {source}")]
    BadAttribute {
        attribute: &'static str,
        #[source]
        source: EscapeError,
    },

    /// The station carries no bureau id to key it by
    #[error("station has no '{}' attribute", attributes::BOM_ID)]
    MissingBomId,
}

/// Result of reading one station element
#[derive(Debug)]
pub enum StationOutcome {
    /// Station read successfully, with its latest observation when present
    Parsed {
        station: Station,
        observation: Option<Observation>,
        unknown_elements: usize,
    },
    /// Station could not be read
    Skipped {
        station_name: Option<String>,
        reason: String,
    },
}

/// Parse a single station element
pub fn parse_station(element: &XmlElement, config: &ParserConfig) -> StationOutcome {
    match read_station(element, config) {
        Ok((station, observation, unknown_elements)) => StationOutcome::Parsed {
            station,
            observation,
            unknown_elements,
        },
        Err(e) => StationOutcome::Skipped {
            station_name: element
                .attr_lossy(attributes::STATION_NAME)
                .map(|name| name.into_owned()),
            reason: e.to_string(),
        },
    }
}

fn read_station(
    element: &XmlElement,
    config: &ParserConfig,
) -> Result<(Station, Option<Observation>, usize), StationError> {
    let station = Station {
        wmo_id: read_attr(element, attributes::WMO_ID)?,
        bom_id: read_attr(element, attributes::BOM_ID)?,
        station_name: read_attr(element, attributes::STATION_NAME)?,
        station_description: read_attr(element, attributes::DESCRIPTION)?,
        latitude: parse_float(read_attr(element, attributes::LATITUDE)?.as_deref()),
        longitude: parse_float(read_attr(element, attributes::LONGITUDE)?.as_deref()),
        height_meters: parse_float(read_attr(element, attributes::HEIGHT)?.as_deref()),
        timezone: read_attr(element, attributes::TIMEZONE)?,
        station_type: read_attr(element, attributes::TYPE)?,
        forecast_district_id: read_attr(element, attributes::FORECAST_DISTRICT_ID)?,
    };

    let has_bom_id = station
        .bom_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());
    if config.require_bom_id && !has_bom_id {
        return Err(StationError::MissingBomId);
    }

    let Some(period) = element.child_with_attr(
        elements::PERIOD,
        attributes::INDEX,
        &config.latest_period_index,
    ) else {
        trace!(
            "Station {:?} has no period with index {}",
            station.bom_id, config.latest_period_index
        );
        return Ok((station, None, 0));
    };

    let mut observation = Observation::for_station(&station);
    observation.observation_time_utc =
        parse_timestamp(period.attr_lossy(attributes::TIME_UTC).as_deref());
    observation.observation_time_local =
        parse_timestamp(period.attr_lossy(attributes::TIME_LOCAL).as_deref());
    observation.wind_source = period
        .attr_lossy(attributes::WIND_SOURCE)
        .map(|value| value.into_owned());

    let unknown_elements = match period.child_with_attr(
        elements::LEVEL,
        attributes::TYPE,
        &config.surface_level_type,
    ) {
        Some(level) => extract_measurements(level, &mut observation),
        None => 0,
    };

    Ok((station, Some(observation), unknown_elements))
}

fn read_attr(element: &XmlElement, name: &'static str) -> Result<Option<String>, StationError> {
    element
        .attr(name)
        .map(|value| value.map(|v| v.into_owned()))
        .map_err(|source| StationError::BadAttribute {
            attribute: name,
            source,
        })
}

/// Merge the measurements of a level into an observation
///
/// Returns the number of `element` children that were ignored because their
/// type code is missing or unknown.
pub fn extract_measurements(level: &XmlElement, observation: &mut Observation) -> usize {
    let mut ignored = 0;

    for element in level.children_named(elements::ELEMENT) {
        let code = element.attr_lossy(attributes::TYPE);
        let Some(descriptor) = code.as_deref().and_then(measurement_mapping::lookup) else {
            trace!("Ignoring unmapped element type {:?}", code);
            ignored += 1;
            continue;
        };

        let value = match descriptor.kind {
            ValueKind::Text => parse_text(element.text()).map(FieldValue::Text),
            ValueKind::Number => parse_float(element.text()).map(FieldValue::Number),
        };
        observation.insert_measurement(descriptor.field, value);

        if let Some((utc_field, local_field)) = descriptor.time_fields() {
            let utc = parse_timestamp(element.attr_lossy(attributes::TIME_UTC).as_deref());
            let local = parse_timestamp(element.attr_lossy(attributes::TIME_LOCAL).as_deref());
            observation.insert_measurement(utc_field, utc.map(FieldValue::Time));
            observation.insert_measurement(local_field, local.map(FieldValue::Time));
        }
    }

    ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_element(xml: &str) -> XmlElement {
        XmlElement::parse_document(xml).unwrap()
    }

    #[test]
    fn test_station_attributes() {
        let element = station_element(
            r#"<station wmo-id="95936" bom-id="086338" tz="Australia/Melbourne"
                 stn-name="MELBOURNE (OLYMPIC PARK)" stn-height="7.53" type="AWS"
                 lat="-37.8255" lon="144.9816" forecast-district-id="VIC_PW007"
                 description="Melbourne (Olympic Park)"/>"#,
        );

        let StationOutcome::Parsed {
            station,
            observation,
            ..
        } = parse_station(&element, &ParserConfig::default())
        else {
            panic!("station should parse");
        };

        assert_eq!(station.wmo_id.as_deref(), Some("95936"));
        assert_eq!(station.bom_id.as_deref(), Some("086338"));
        assert_eq!(station.station_name.as_deref(), Some("MELBOURNE (OLYMPIC PARK)"));
        assert_eq!(station.station_description.as_deref(), Some("Melbourne (Olympic Park)"));
        assert_eq!(station.latitude, Some(-37.8255));
        assert_eq!(station.longitude, Some(144.9816));
        assert_eq!(station.height_meters, Some(7.53));
        assert_eq!(station.timezone.as_deref(), Some("Australia/Melbourne"));
        assert_eq!(station.station_type.as_deref(), Some("AWS"));
        assert_eq!(station.forecast_district_id.as_deref(), Some("VIC_PW007"));
        assert!(observation.is_none());
    }

    #[test]
    fn test_bad_escape_skips_station() {
        let element = station_element(r#"<station bom-id="086338" stn-name="BAD &nope; NAME"/>"#);
        match parse_station(&element, &ParserConfig::default()) {
            StationOutcome::Skipped {
                station_name,
                reason,
            } => {
                assert_eq!(station_name, None);
                assert!(reason.contains("stn-name"));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_bom_id_respects_config() {
        let element = station_element(r#"<station stn-name="NO ID"/>"#);

        match parse_station(&element, &ParserConfig::default()) {
            StationOutcome::Parsed { station, .. } => {
                assert_eq!(station.bom_id, None);
                assert_eq!(station.station_name.as_deref(), Some("NO ID"));
            }
            other => panic!("expected station, got {:?}", other),
        }

        let strict = ParserConfig::default().require_bom_id();
        match parse_station(&element, &strict) {
            StationOutcome::Skipped {
                station_name,
                reason,
            } => {
                assert_eq!(station_name.as_deref(), Some("NO ID"));
                assert!(reason.contains("bom-id"));
            }
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_measurements_kinds_and_extrema() {
        let level = station_element(
            r#"<level index="0" type="surface">
  <element units="Celsius" type="air_temperature">15.4</element>
  <element type="wind_dir">NW</element>
  <element units="%" type="rel-humidity">-</element>
  <element type="maximum_air_temperature" time-utc="2024-01-15T04:12:00+00:00"
           time-local="2024-01-15T15:12:00+11:00" units="Celsius">24.3</element>
  <element type="maximum_gust_kmh" time-utc="bad" units="km/h">44</element>
  <element type="sea_state">Calm</element>
  <element>7</element>
</level>"#,
        );

        let mut observation = Observation::default();
        let ignored = extract_measurements(&level, &mut observation);

        assert_eq!(ignored, 2);
        assert_eq!(observation.number("temperature_celsius"), Some(15.4));
        assert_eq!(observation.text("wind_direction"), Some("NW"));
        assert!(observation.has_field("relative_humidity_percent"));
        assert_eq!(observation.measurement("relative_humidity_percent"), None);

        assert_eq!(observation.number("max_temperature_celsius"), Some(24.3));
        let utc = observation.time("max_temperature_time_utc").unwrap();
        let local = observation.time("max_temperature_time_local").unwrap();
        assert_eq!(utc, local);

        assert_eq!(observation.number("max_gust_kmh"), Some(44.0));
        assert!(observation.has_field("max_gust_time_utc"));
        assert_eq!(observation.time("max_gust_time_utc"), None);
        assert_eq!(observation.time("max_gust_time_local"), None);

        assert!(!observation.has_field("sea_state"));
        assert_eq!(observation.measurement_count(), 9);
    }

    #[test]
    fn test_text_measurements_are_trimmed() {
        let level = station_element(
            "<level index=\"0\" type=\"surface\">\n\
  <element type=\"cloud\">\n    Mostly cloudy \n  </element>\n\
  <element type=\"wind_dir\">  NW\t</element>\n\
  <element type=\"maximum_gust_dir\">   </element>\n\
</level>",
        );

        let mut observation = Observation::default();
        extract_measurements(&level, &mut observation);

        assert_eq!(observation.text("cloud_description"), Some("Mostly cloudy"));
        assert_eq!(observation.text("wind_direction"), Some("NW"));
        assert!(observation.has_field("max_gust_direction"));
        assert_eq!(observation.measurement("max_gust_direction"), None);
    }
}
