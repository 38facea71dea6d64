use std::fmt;

use chrono::NaiveDateTime;

use crate::stats::Summary;

// ---------------------------------------------------------------------------
// Field – one numeric measurement column
// ---------------------------------------------------------------------------

/// The numeric columns every station export carries, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Ghi,
    Dni,
    Dhi,
    Tamb,
    TModA,
    TModB,
    Ws,
    WsGust,
    Wd,
    Rh,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Ghi,
        Field::Dni,
        Field::Dhi,
        Field::Tamb,
        Field::TModA,
        Field::TModB,
        Field::Ws,
        Field::WsGust,
        Field::Wd,
        Field::Rh,
    ];

    /// Column name as it appears in the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            Field::Ghi => "GHI",
            Field::Dni => "DNI",
            Field::Dhi => "DHI",
            Field::Tamb => "Tamb",
            Field::TModA => "TModA",
            Field::TModB => "TModB",
            Field::Ws => "WS",
            Field::WsGust => "WSgust",
            Field::Wd => "WD",
            Field::Rh => "RH",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Ghi | Field::Dni | Field::Dhi => "W/m²",
            Field::Tamb | Field::TModA | Field::TModB => "°C",
            Field::Ws | Field::WsGust => "m/s",
            Field::Wd => "°",
            Field::Rh => "%",
        }
    }

    /// Human-readable axis label, e.g. `Global Horizontal Irradiance (W/m²)`.
    pub fn label(self) -> String {
        let long = match self {
            Field::Ghi => "Global Horizontal Irradiance",
            Field::Dni => "Direct Normal Irradiance",
            Field::Dhi => "Diffuse Horizontal Irradiance",
            Field::Tamb => "Ambient Temperature",
            Field::TModA => "Module Temperature A",
            Field::TModB => "Module Temperature B",
            Field::Ws => "Wind Speed",
            Field::WsGust => "Wind Gust Speed",
            Field::Wd => "Wind Direction",
            Field::Rh => "Relative Humidity",
        };
        format!("{long} ({})", self.unit())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Record – one measurement row
// ---------------------------------------------------------------------------

/// A single measurement row. Gaps in the source export are stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub ghi: f64,
    pub dni: f64,
    pub dhi: f64,
    pub tamb: f64,
    pub tmod_a: f64,
    pub tmod_b: f64,
    pub ws: f64,
    pub ws_gust: f64,
    pub wd: f64,
    pub rh: f64,
}

impl Record {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Ghi => self.ghi,
            Field::Dni => self.dni,
            Field::Dhi => self.dhi,
            Field::Tamb => self.tamb,
            Field::TModA => self.tmod_a,
            Field::TModB => self.tmod_b,
            Field::Ws => self.ws,
            Field::WsGust => self.ws_gust,
            Field::Wd => self.wd,
            Field::Rh => self.rh,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded measurement series
// ---------------------------------------------------------------------------

/// An ordered measurement series. Rows keep their file order; the series is
/// not required to be sorted by timestamp (filtering is a predicate, not a
/// slice).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest timestamp in the series, or `None` when empty.
    pub fn time_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut iter = self.records.iter().map(|r| r.timestamp);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some((min, max))
    }

    /// Extract one numeric column.
    pub fn column(&self, field: Field) -> Vec<f64> {
        self.records.iter().map(|r| r.value(field)).collect()
    }

    /// Per-field summary statistics in canonical column order, mirroring a
    /// pandas `describe()` table.
    pub fn describe(&self) -> Vec<(Field, Summary)> {
        Field::ALL
            .iter()
            .map(|&f| (f, Summary::compute(&self.column(f))))
            .collect()
    }
}
