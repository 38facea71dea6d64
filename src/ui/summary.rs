use eframe::egui::{Grid, RichText, Ui};

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Descriptive statistics table
// ---------------------------------------------------------------------------

/// Render the `describe()`-style statistics grid: one row per numeric column.
pub fn statistics_grid(ui: &mut Ui, table: &Table) {
    Grid::new("summary_statistics")
        .striped(true)
        .min_col_width(48.0)
        .show(ui, |ui| {
            for header in ["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for (field, s) in table.describe() {
                ui.label(RichText::new(field.name()).strong());
                ui.label(s.count.to_string());
                for value in [s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max] {
                    ui.label(fmt_stat(value));
                }
                ui.end_row();
            }
        });
}

fn fmt_stat(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "–".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_formatting_handles_nan() {
        assert_eq!(fmt_stat(12.345), "12.35");
        assert_eq!(fmt_stat(f64::NAN), "–");
    }
}
