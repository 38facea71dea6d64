use chrono::NaiveDateTime;

use super::model::Table;

/// Rows of `table` whose timestamp lies in the closed interval
/// `[start, end]`, in their original order.
///
/// An inverted range (`start > end`) selects nothing; it is not an error.
pub fn filter_range(table: &Table, start: NaiveDateTime, end: NaiveDateTime) -> Table {
    Table::new(
        table
            .records
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use chrono::NaiveDate;

    fn table_over_days(days: &[u32]) -> Table {
        Table::new(
            days.iter()
                .map(|&d| Record {
                    timestamp: NaiveDate::from_ymd_opt(2021, 8, d)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap(),
                    ghi: d as f64,
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

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 8, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn keeps_rows_inside_the_closed_interval() {
        let table = table_over_days(&[1, 2, 3, 4, 5]);
        let out = filter_range(&table, noon(2), noon(4));
        assert_eq!(out.len(), 3);
        assert!(out.records.iter().all(|r| {
            r.timestamp >= noon(2) && r.timestamp <= noon(4)
        }));
        // endpoints are inclusive
        assert_eq!(out.records[0].timestamp, noon(2));
        assert_eq!(out.records[2].timestamp, noon(4));
    }

    #[test]
    fn preserves_original_row_order() {
        let table = table_over_days(&[3, 1, 5, 2]);
        let out = filter_range(&table, noon(1), noon(3));
        let ghis: Vec<f64> = out.records.iter().map(|r| r.ghi).collect();
        assert_eq!(ghis, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn inverted_range_yields_empty_table() {
        let table = table_over_days(&[1, 2, 3]);
        let out = filter_range(&table, noon(3), noon(1));
        assert!(out.is_empty());
    }

    #[test]
    fn full_range_reproduces_the_table_unchanged() {
        let table = table_over_days(&[2, 1, 4, 3]);
        let (min, max) = table.time_bounds().unwrap();
        let out = filter_range(&table, min, max);
        assert_eq!(out, table);
    }

    #[test]
    fn window_with_no_rows_yields_empty_table() {
        let table = table_over_days(&[1, 2, 3]);
        let out = filter_range(&table, noon(10), noon(11));
        assert!(out.is_empty());
    }
}
