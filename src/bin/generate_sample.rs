use std::f64::consts::PI;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One output row. `Option` fields leave the occasional cell empty, like the
/// gaps in real station exports.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "GHI")]
    ghi: Option<f64>,
    #[serde(rename = "DNI")]
    dni: f64,
    #[serde(rename = "DHI")]
    dhi: f64,
    #[serde(rename = "Tamb")]
    tamb: f64,
    #[serde(rename = "TModA")]
    tmod_a: f64,
    #[serde(rename = "TModB")]
    tmod_b: f64,
    #[serde(rename = "WS")]
    ws: f64,
    #[serde(rename = "WSgust")]
    ws_gust: f64,
    #[serde(rename = "WD")]
    wd: f64,
    #[serde(rename = "RH")]
    rh: Option<f64>,
}

/// Per-station climate parameters.
struct Station {
    file_name: &'static str,
    ghi_peak: f64,
    temp_base: f64,
    rh_base: f64,
    wind_base: f64,
    wd_mean: f64,
}

const STATIONS: [Station; 3] = [
    Station {
        file_name: "benin-malanville.csv",
        ghi_peak: 950.0,
        temp_base: 28.0,
        rh_base: 55.0,
        wind_base: 2.2,
        wd_mean: 200.0,
    },
    Station {
        file_name: "sierraleone-bumbuna.csv",
        ghi_peak: 880.0,
        temp_base: 26.0,
        rh_base: 78.0,
        wind_base: 1.4,
        wd_mean: 230.0,
    },
    Station {
        file_name: "togo-dapaong_qc.csv",
        ghi_peak: 920.0,
        temp_base: 27.5,
        rh_base: 62.0,
        wind_base: 1.9,
        wd_mean: 185.0,
    },
];

const DAYS: i64 = 14;
const STEP_MINUTES: i64 = 10;

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Solar elevation proxy: 0 at night, sine bump between 06:00 and 18:00.
fn elevation(minute_of_day: f64) -> f64 {
    let sunrise = 6.0 * 60.0;
    let sunset = 18.0 * 60.0;
    if minute_of_day <= sunrise || minute_of_day >= sunset {
        return 0.0;
    }
    ((minute_of_day - sunrise) / (sunset - sunrise) * PI).sin()
}

fn generate_row(station: &Station, ts: NaiveDateTime, cloud: f64, rng: &mut StdRng) -> Row {
    let minute = f64::from(ts.time().hour() * 60 + ts.time().minute());
    let elev = elevation(minute);

    // Night readings sit slightly below zero, matching real pyranometers.
    let ghi = if elev > 0.0 {
        station.ghi_peak * elev.powf(1.2) * cloud + rng.gen_range(-8.0..8.0)
    } else {
        rng.gen_range(-1.5..-0.5)
    };
    let dni = if elev > 0.0 {
        (station.ghi_peak * 0.85 * elev * cloud * cloud + rng.gen_range(-10.0..10.0)).max(0.0)
    } else {
        0.0
    };
    let dhi = if elev > 0.0 {
        (ghi * (0.18 + 0.5 * (1.0 - cloud)) + rng.gen_range(-5.0..5.0)).max(0.0)
    } else {
        0.0
    };

    // Air temperature peaks mid-afternoon; module temperature tracks it plus
    // absorbed irradiance.
    let diurnal = ((minute - 14.0 * 60.0) / (24.0 * 60.0) * 2.0 * PI).cos();
    let tamb = station.temp_base + 5.5 * diurnal + rng.gen_range(-0.6..0.6);
    let tmod_a = tamb + ghi.max(0.0) * 0.022 + rng.gen_range(-0.8..0.8);
    let tmod_b = tamb + ghi.max(0.0) * 0.024 + rng.gen_range(-0.8..0.8);

    let ws = (station.wind_base + 1.2 * elev + rng.gen_range(-0.8..0.8)).max(0.0);
    let ws_gust = ws + rng.gen_range(0.2..1.8);
    let wd = (station.wd_mean + rng.gen_range(-35.0..35.0)).rem_euclid(360.0);

    // Humidity moves against temperature.
    let rh = (station.rh_base - (tamb - station.temp_base) * 3.0 + rng.gen_range(-4.0..4.0))
        .clamp(5.0, 100.0);

    // ~0.2% of irradiance / humidity cells are missing.
    let drop_ghi = rng.gen_bool(0.002);
    let drop_rh = rng.gen_bool(0.002);

    Row {
        timestamp: ts.format("%Y-%m-%d %H:%M").to_string(),
        ghi: (!drop_ghi).then_some(round1(ghi)),
        dni: round1(dni),
        dhi: round1(dhi),
        tamb: round1(tamb),
        tmod_a: round1(tmod_a),
        tmod_b: round1(tmod_b),
        ws: round1(ws),
        ws_gust: round1(ws_gust),
        wd: round1(wd),
        rh: (!drop_rh).then_some(round1(rh)),
    }
}

fn main() {
    let out_dir = std::env::var_os("SOLAR_DASH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir).expect("Failed to create data directory");

    let mut rng = StdRng::seed_from_u64(42);
    let first_day = NaiveDate::from_ymd_opt(2021, 8, 1).expect("valid date");

    for station in &STATIONS {
        let path = out_dir.join(station.file_name);
        let mut writer = csv::Writer::from_path(&path).expect("Failed to open output file");

        let mut rows = 0usize;
        for day in 0..DAYS {
            // One cloudiness level per day, varied slowly within the day.
            let day_cloud: f64 = rng.gen_range(0.55..1.0);
            let mut ts = (first_day + Duration::days(day)).and_time(NaiveTime::MIN);
            let day_end = ts + Duration::days(1);
            while ts < day_end {
                let cloud = (day_cloud + rng.gen_range(-0.08..0.08)).clamp(0.2, 1.0);
                writer
                    .serialize(generate_row(station, ts, cloud, &mut rng))
                    .expect("Failed to write row");
                rows += 1;
                ts += Duration::minutes(STEP_MINUTES);
            }
        }
        writer.flush().expect("Failed to flush output file");
        println!("Wrote {rows} rows to {}", path.display());
    }
}
