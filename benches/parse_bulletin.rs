use bom_observations::BulletinParser;
use bom_observations::app::services::export::{DatabaseExport, Table, TableRows};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const STATION: &str = r#"
    <station wmo-id="95936" bom-id="{ID}" tz="Australia/Melbourne" stn-name="STATION {ID}" stn-height="7.53" type="AWS" lat="-37.8255" lon="144.9816">
      <period index="0" time-utc="2024-01-15T10:30:00+00:00" time-local="2024-01-15T21:30:00+11:00" wind-src="OMD">
        <level index="0" type="surface">
          <element units="Celsius" type="apparent_temp">14.9</element>
          <element units="Celsius" type="air_temperature">17.2</element>
          <element units="Celsius" type="dew_point">11.4</element>
          <element units="hPa" type="msl_pres">1014.8</element>
          <element units="%" type="rel-humidity">69</element>
          <element type="wind_dir">SSW</element>
          <element units="deg" type="wind_dir_deg">203</element>
          <element units="km/h" type="wind_spd_kmh">13</element>
          <element time-utc="2024-01-15T04:12:00+00:00" time-local="2024-01-15T15:12:00+11:00" units="Celsius" type="maximum_air_temperature">24.3</element>
          <element units="mm" type="rainfall">0.2</element>
        </level>
      </period>
      <period index="1" time-utc="2024-01-15T10:00:00+00:00">
        <level index="0" type="surface">
          <element units="Celsius" type="air_temperature">17.9</element>
        </level>
      </period>
    </station>"#;

fn bulletin(stations: usize) -> String {
    let body: String = (0..stations)
        .map(|i| STATION.replace("{ID}", &format!("{:06}", i)))
        .collect();
    format!(
        "<product><amoc><identifier>IDV60920</identifier>\
         <issue-time-utc>2024-01-15T10:36:00+00:00</issue-time-utc></amoc>\
         <observations>{}</observations></product>",
        body
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bulletin");
    let parser = BulletinParser::new();

    for stations in [10, 100, 500] {
        let xml = bulletin(stations);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::new("stations", stations), &xml, |b, xml| {
            b.iter(|| parser.parse_str(black_box(xml)));
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let parsed = match BulletinParser::new().parse_str(&bulletin(100)) {
        Ok(parsed) => parsed,
        Err(e) => panic!("benchmark bulletin should parse: {}", e),
    };

    group.bench_function("json", |b| {
        b.iter(|| DatabaseExport::from_bulletin(black_box(&parsed)).to_json_string(false));
    });
    group.bench_function("observation_rows", |b| {
        b.iter(|| TableRows::from_bulletin(black_box(&parsed), Table::Observations));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_export);
criterion_main!(benches);
