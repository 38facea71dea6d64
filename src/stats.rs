//! Descriptive statistics used by the summary table and the plot builders.
//!
//! Everything here is NaN-tolerant: gaps in the station exports are stored as
//! NaN and must not poison means, quartiles, or correlations. Quartiles use
//! linear interpolation and `std` is the sample standard deviation (n−1),
//! matching what a pandas `describe()` of the same column would report.

use crate::data::model::{Field, Table};

// ---------------------------------------------------------------------------
// Summary – describe() row for one column
// ---------------------------------------------------------------------------

/// Count / mean / std / min / quartiles / max for a single column.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    /// Compute the summary over the finite values of `values`.
    ///
    /// With no finite values the count is 0 and every statistic is NaN.
    pub fn compute(values: &[f64]) -> Self {
        let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let count = finite.len();
        if count == 0 {
            return Summary {
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q1: f64::NAN,
                median: f64::NAN,
                q3: f64::NAN,
                max: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let std = if count > 1 {
            let ss = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };

        finite.sort_by(f64::total_cmp);
        Summary {
            count,
            mean,
            std,
            min: finite[0],
            q1: quantile_sorted(&finite, 0.25),
            median: quantile_sorted(&finite, 0.5),
            q3: quantile_sorted(&finite, 0.75),
            max: finite[count - 1],
        }
    }
}

/// Linearly interpolated quantile of an ascending-sorted non-empty slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson correlation over the pairwise-complete rows of `xs` and `ys`.
///
/// Rows where either value is non-finite are skipped. Returns NaN when fewer
/// than two complete pairs remain or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let my = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }
    cov / (vx.sqrt() * vy.sqrt())
}

/// Square Pearson correlation matrix over the given columns of `table`.
///
/// Symmetric, with exact 1.0 on the diagonal.
pub fn correlation_matrix(table: &Table, fields: &[Field]) -> Vec<Vec<f64>> {
    let columns: Vec<Vec<f64>> = fields.iter().map(|&f| table.column(f)).collect();
    let k = columns.len();
    let mut matrix = vec![vec![0.0; k]; k];
    for i in 0..k {
        matrix[i][i] = 1.0;
        for j in (i + 1)..k {
            let r = pearson(&columns[i], &columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use chrono::NaiveDate;

    #[test]
    fn summary_matches_hand_computed_values() {
        let s = Summary::compute(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < 1e-12);
        // sample std of 1..4 is sqrt(5/3)
        assert!((s.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((s.q1 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q3 - 3.25).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn summary_skips_nan_values() {
        let s = Summary::compute(&[f64::NAN, 10.0, f64::NAN, 20.0]);
        assert_eq!(s.count, 2);
        assert!((s.mean - 15.0).abs() < 1e-12);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 20.0);
    }

    #[test]
    fn summary_of_empty_input_has_zero_count() {
        let s = Summary::compute(&[f64::NAN]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.max.is_nan());
    }

    #[test]
    fn pearson_detects_perfect_linear_relation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_skips_incomplete_pairs() {
        let xs = [1.0, f64::NAN, 2.0, 3.0];
        let ys = [2.0, 100.0, 4.0, 6.0];
        assert!((pearson(&xs, &ys) - 1.0).abs() < 1e-12);
    }

    fn tiny_table() -> Table {
        let base = NaiveDate::from_ymd_opt(2021, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows = [
            (100.0, 80.0, 20.0),
            (300.0, 240.0, 55.0),
            (500.0, 430.0, 80.0),
            (700.0, 610.0, 120.0),
        ];
        Table::new(
            rows.iter()
                .enumerate()
                .map(|(i, &(ghi, dni, dhi))| Record {
                    timestamp: base + chrono::Duration::minutes(i as i64),
                    ghi,
                    dni,
                    dhi,
                    tamb: 25.0,
                    tmod_a: 30.0,
                    tmod_b: 31.0,
                    ws: 1.0,
                    ws_gust: 2.0,
                    wd: 180.0,
                    rh: 50.0,
                })
                .collect(),
        )
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let fields = [Field::Ghi, Field::Dni, Field::Dhi];
        let m = correlation_matrix(&tiny_table(), &fields);
        for i in 0..fields.len() {
            assert!((m[i][i] - 1.0).abs() < 1e-9);
            for j in 0..fields.len() {
                assert!((m[i][j] - m[j][i]).abs() < 1e-9);
            }
        }
    }
}
