use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Dataset – the fixed allow-list of station exports
// ---------------------------------------------------------------------------

/// The three known station datasets. The dashboard only ever reads these
/// files; arbitrary paths are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    BeninMalanville,
    SierraLeoneBumbuna,
    TogoDapaong,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [
        Dataset::BeninMalanville,
        Dataset::SierraLeoneBumbuna,
        Dataset::TogoDapaong,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::BeninMalanville => "benin-malanville.csv",
            Dataset::SierraLeoneBumbuna => "sierraleone-bumbuna.csv",
            Dataset::TogoDapaong => "togo-dapaong_qc.csv",
        }
    }

    /// Station label shown in the navigation selector.
    pub fn label(self) -> &'static str {
        match self {
            Dataset::BeninMalanville => "Benin – Malanville",
            Dataset::SierraLeoneBumbuna => "Sierra Leone – Bumbuna",
            Dataset::TogoDapaong => "Togo – Dapaong",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Directory the station CSVs are read from. `SOLAR_DASH_DATA_DIR` overrides
/// the default `./data`.
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("SOLAR_DASH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

/// One CSV row as written by the station export. Numeric gaps deserialize as
/// `None` and are stored as NaN; extra columns in the export are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "GHI")]
    ghi: Option<f64>,
    #[serde(rename = "DNI")]
    dni: Option<f64>,
    #[serde(rename = "DHI")]
    dhi: Option<f64>,
    #[serde(rename = "Tamb")]
    tamb: Option<f64>,
    #[serde(rename = "TModA")]
    tmod_a: Option<f64>,
    #[serde(rename = "TModB")]
    tmod_b: Option<f64>,
    #[serde(rename = "WS")]
    ws: Option<f64>,
    #[serde(rename = "WSgust")]
    ws_gust: Option<f64>,
    #[serde(rename = "WD")]
    wd: Option<f64>,
    #[serde(rename = "RH")]
    rh: Option<f64>,
}

/// Load a station dataset from `data_dir`.
///
/// Fails when the file is missing, a required column is absent, a numeric
/// cell is malformed, or a timestamp does not parse.
pub fn load(data_dir: &Path, dataset: Dataset) -> Result<Table> {
    let path = data_dir.join(dataset.file_name());
    let mut reader = csv::Reader::from_path(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("{}: row {row_no}", dataset.file_name()))?;
        let timestamp = parse_timestamp(&raw.timestamp)
            .with_context(|| format!("{}: row {row_no}", dataset.file_name()))?;
        records.push(Record {
            timestamp,
            ghi: raw.ghi.unwrap_or(f64::NAN),
            dni: raw.dni.unwrap_or(f64::NAN),
            dhi: raw.dhi.unwrap_or(f64::NAN),
            tamb: raw.tamb.unwrap_or(f64::NAN),
            tmod_a: raw.tmod_a.unwrap_or(f64::NAN),
            tmod_b: raw.tmod_b.unwrap_or(f64::NAN),
            ws: raw.ws.unwrap_or(f64::NAN),
            ws_gust: raw.ws_gust.unwrap_or(f64::NAN),
            wd: raw.wd.unwrap_or(f64::NAN),
            rh: raw.rh.unwrap_or(f64::NAN),
        });
    }

    log::info!(
        "Loaded {} rows from {}",
        records.len(),
        dataset.file_name()
    );
    Ok(Table::new(records))
}

/// Parse a station timestamp. The exports write minute precision; some tools
/// re-export with seconds, so accept both.
fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts);
        }
    }
    bail!("'{s}' is not a valid timestamp");
}
