use rand::Rng;
use rand::seq::index;

use super::model::Table;

/// Row bound for the bubble chart. Anything denser is unreadable at typical
/// panel sizes.
pub const BUBBLE_SAMPLE_LIMIT: usize = 1000;

/// A uniform random subset of `min(n, len)` rows, drawn without replacement.
///
/// The chosen indices are re-sorted so the subset keeps the table's original
/// row order. The RNG is supplied by the caller; the app uses a thread RNG
/// while tests pass a seeded one.
pub fn sample<R: Rng + ?Sized>(table: &Table, n: usize, rng: &mut R) -> Table {
    if table.len() <= n {
        return table.clone();
    }
    let mut indices = index::sample(rng, table.len(), n).into_vec();
    indices.sort_unstable();
    Table::new(
        indices
            .into_iter()
            .map(|i| table.records[i].clone())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table_of(n: usize) -> Table {
        let base = NaiveDate::from_ymd_opt(2021, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Table::new(
            (0..n)
                .map(|i| Record {
                    timestamp: base + chrono::Duration::minutes(i as i64),
                    ghi: i as f64,
                    dni: 0.0,
                    dhi: 0.0,
                    tamb: 25.0,
                    tmod_a: 0.0,
                    tmod_b: 0.0,
                    ws: 1.0,
                    ws_gust: 2.0,
                    wd: 180.0,
                    rh: 50.0,
                })
                .collect(),
        )
    }

    #[test]
    fn returns_exactly_n_rows_without_duplicates() {
        let table = table_of(500);
        let mut rng = StdRng::seed_from_u64(7);
        let out = sample(&table, 100, &mut rng);
        assert_eq!(out.len(), 100);

        let mut seen: Vec<f64> = out.records.iter().map(|r| r.ghi).collect();
        seen.sort_by(f64::total_cmp);
        seen.dedup();
        assert_eq!(seen.len(), 100);
        // every sampled row exists in the input
        assert!(seen.iter().all(|&g| g >= 0.0 && g < 500.0 && g.fract() == 0.0));
    }

    #[test]
    fn small_tables_are_returned_whole() {
        let table = table_of(30);
        let mut rng = StdRng::seed_from_u64(7);
        let out = sample(&table, 100, &mut rng);
        assert_eq!(out, table);
    }

    #[test]
    fn sampled_rows_keep_table_order() {
        let table = table_of(200);
        let mut rng = StdRng::seed_from_u64(11);
        let out = sample(&table, 50, &mut rng);
        let ghis: Vec<f64> = out.records.iter().map(|r| r.ghi).collect();
        assert!(ghis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn same_seed_draws_the_same_subset() {
        let table = table_of(200);
        let a = sample(&table, 50, &mut StdRng::seed_from_u64(3));
        let b = sample(&table, 50, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
