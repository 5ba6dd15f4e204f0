//! Test utilities for bulletin parser testing
//!
//! This module provides bulletin fixtures and helper functions used across
//! the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a complete test bulletin with three stations
///
/// - Olympic Park: full surface level with extrema
/// - Avalon: only an older period, so no observation
/// - Mount Buller: unparsable latitude and an unknown element type
pub fn create_test_bulletin() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<product xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="v1.7.1">
  <amoc version="1.7">
    <source>
      <sender>Australian Government Bureau of Meteorology</sender>
      <region>Victoria</region>
      <office>VICRO</office>
    </source>
    <identifier>IDV60920</identifier>
    <issue-time-utc>2024-01-15T10:36:00+00:00</issue-time-utc>
    <issue-time-local tz="EDT">2024-01-15T21:36:00+11:00</issue-time-local>
    <sent-time>2024-01-15T10:36:24+00:00</sent-time>
    <status>O</status>
    <service>WSO</service>
    <product-type>O</product-type>
  </amoc>
  <observations>
    <station wmo-id="95936" bom-id="086338" tz="Australia/Melbourne" stn-name="MELBOURNE (OLYMPIC PARK)" stn-height="7.53" type="AWS" lat="-37.8255" lon="144.9816" forecast-district-id="VIC_PW007" description="Melbourne (Olympic Park)">
      <period index="0" time-utc="2024-01-15T10:30:00+00:00" time-local="2024-01-15T21:30:00+11:00" wind-src="OMD">
        <level index="0" type="surface">
          <element units="Celsius" type="apparent_temp">14.9</element>
          <element units="Celsius" type="delta_t">3.1</element>
          <element units="km/h" type="gust_kmh">19</element>
          <element units="knots" type="wind_gust_spd">10</element>
          <element units="Celsius" type="air_temperature">17.2</element>
          <element units="Celsius" type="dew_point">11.4</element>
          <element units="hPa" type="pres">1013.9</element>
          <element units="hPa" type="msl_pres">1014.8</element>
          <element units="hPa" type="qnh_pres">1014.8</element>
          <element units="mm" type="rain_hour">0.0</element>
          <element units="mm" type="rain_ten">0.0</element>
          <element units="%" type="rel-humidity">69</element>
          <element units="km" type="vis_km">10</element>
          <element type="wind_dir">SSW</element>
          <element units="deg" type="wind_dir_deg">203</element>
          <element units="km/h" type="wind_spd_kmh">13</element>
          <element units="knots" type="wind_spd">7</element>
          <element type="cloud">Partly cloudy</element>
          <element type="cloud_oktas">4</element>
          <element time-utc="2024-01-15T04:12:00+00:00" time-local="2024-01-15T15:12:00+11:00" units="Celsius" type="maximum_air_temperature">24.3</element>
          <element time-utc="2024-01-14T19:45:00+00:00" time-local="2024-01-15T06:45:00+11:00" units="Celsius" type="minimum_air_temperature">13.8</element>
          <element time-utc="2024-01-15T03:02:00+00:00" time-local="2024-01-15T14:02:00+11:00" units="km/h" type="maximum_gust_kmh">44</element>
          <element time-utc="2024-01-15T03:02:00+00:00" time-local="2024-01-15T14:02:00+11:00" type="maximum_gust_dir">S</element>
          <element units="mm" type="rainfall" start-time-local="2024-01-15T09:00:00+11:00" end-time-local="2024-01-15T21:30:00+11:00">0.2</element>
        </level>
      </period>
      <period index="1" time-utc="2024-01-15T10:00:00+00:00" time-local="2024-01-15T21:00:00+11:00">
        <level index="0" type="surface">
          <element units="Celsius" type="air_temperature">17.9</element>
        </level>
      </period>
    </station>
    <station wmo-id="94854" bom-id="087113" tz="Australia/Melbourne" stn-name="AVALON AIRPORT" stn-height="10.6" type="AWS" lat="-38.0287" lon="144.4783" forecast-district-id="VIC_PW008" description="Avalon Airport">
      <period index="1" time-utc="2024-01-15T10:00:00+00:00" time-local="2024-01-15T21:00:00+11:00">
        <level index="0" type="surface">
          <element units="Celsius" type="air_temperature">16.1</element>
        </level>
      </period>
    </station>
    <station wmo-id="94894" bom-id="083024" tz="Australia/Melbourne" stn-name="MOUNT BULLER" stn-height="1707.0" type="AWS" lat="n/a" lon="146.4378" forecast-district-id="VIC_PW005" description="Mount Buller">
      <period index="0" time-utc="2024-01-15T10:30:00Z" time-local="2024-01-15T21:30:00+11:00" wind-src="OMD">
        <level index="0" type="surface">
          <element units="Celsius" type="air_temperature">8.7</element>
          <element units="m" type="swell_height">1.5</element>
          <element type="wind_dir">CALM</element>
        </level>
      </period>
    </station>
  </observations>
</product>
"#
    .to_string()
}

/// Helper to create a bulletin wrapping the given station elements
pub fn bulletin_with_stations(stations: &str) -> String {
    format!(
        r#"<product>
  <amoc><identifier>IDV60920</identifier></amoc>
  <observations>
{}
  </observations>
</product>"#,
        stations
    )
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
