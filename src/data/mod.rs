/// Data layer: core types, loading, filtering, sampling, and memoization.
///
/// Pipeline:
/// ```text
///   station CSV (allow-listed)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, Timestamp → NaiveDateTime
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  closed [start, end] interval → filtered Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sample   │  ≤1000 uniform rows for the bubble chart
///   └──────────┘
/// ```
///
/// Every stage returns a new owned value; `cache::PlotCache` is the only
/// mutable state and memoizes each stage by its inputs.

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
