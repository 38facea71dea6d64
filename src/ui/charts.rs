use eframe::egui::{self, Color32, RichText, Sense, Stroke, Ui, vec2};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color;
use crate::data::model::{Field, Table};
use crate::stats::{Summary, correlation_matrix};

/// Columns shown in the summary box plot.
const SUMMARY_FIELDS: [Field; 4] = [Field::Ghi, Field::Tamb, Field::Ws, Field::Rh];

/// Columns correlated in the heatmap.
const HEATMAP_FIELDS: [Field; 5] = [
    Field::Ghi,
    Field::Dni,
    Field::Dhi,
    Field::TModA,
    Field::TModB,
];

/// Columns paired in the scatter matrix.
const MATRIX_FIELDS: [Field; 6] = [
    Field::Ghi,
    Field::Dni,
    Field::Dhi,
    Field::Ws,
    Field::WsGust,
    Field::Wd,
];

/// Area scale for bubble sizes: matplotlib-style `s = WS * 20` in points².
const BUBBLE_AREA_SCALE: f64 = 20.0;

// ---------------------------------------------------------------------------
// Summary box plot
// ---------------------------------------------------------------------------

/// Box-and-whisker summary of {GHI, Tamb, WS, RH} on a shared axis.
pub fn summary_box_plot(ui: &mut Ui, table: &Table) {
    let palette = color::categorical_palette(SUMMARY_FIELDS.len());

    let boxes: Vec<BoxElem> = SUMMARY_FIELDS
        .iter()
        .enumerate()
        .filter_map(|(i, &field)| {
            let s = Summary::compute(&table.column(field));
            if s.count == 0 {
                return None;
            }
            Some(
                BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                    .name(field.name())
                    .box_width(0.5)
                    .whisker_width(0.25)
                    .fill(palette[i].gamma_multiply(0.6))
                    .stroke(Stroke::new(1.5, palette[i])),
            )
        })
        .collect();

    Plot::new("summary_box_plot")
        .height(280.0)
        .y_axis_label("Value")
        .x_axis_label("Variable")
        .x_axis_formatter(|mark, _range| axis_name(&SUMMARY_FIELDS, mark.value, 0.0))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated Pearson correlation grid of {GHI, DNI, DHI, TModA, TModB},
/// colored on a diverging scale fixed to [-1, 1].
pub fn correlation_heatmap(ui: &mut Ui, table: &Table) {
    let matrix = correlation_matrix(table, &HEATMAP_FIELDS);
    let k = HEATMAP_FIELDS.len();

    Plot::new("correlation_heatmap")
        .height(300.0)
        .data_aspect(1.0)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(|mark, _range| axis_name(&HEATMAP_FIELDS, mark.value, 0.5))
        // row 0 is drawn at the top, so the y lookup runs downward
        .y_axis_formatter(move |mark, _range| {
            axis_name(&HEATMAP_FIELDS, (k as f64 - 0.5) - mark.value, 0.0)
        })
        .show(ui, |plot_ui| {
            for (i, row) in matrix.iter().enumerate() {
                // row 0 on top
                let y0 = (k - 1 - i) as f64;
                for (j, &r) in row.iter().enumerate() {
                    let x0 = j as f64;
                    let corners: PlotPoints = vec![
                        [x0, y0],
                        [x0 + 1.0, y0],
                        [x0 + 1.0, y0 + 1.0],
                        [x0, y0 + 1.0],
                    ]
                    .into();

                    let fill = if r.is_finite() {
                        color::diverging(r)
                    } else {
                        Color32::DARK_GRAY
                    };
                    plot_ui.polygon(
                        Polygon::new(corners)
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, Color32::from_gray(40))),
                    );

                    let label = if r.is_finite() {
                        format!("{r:.2}")
                    } else {
                        "–".to_string()
                    };
                    let text_color = if r.is_finite() && r.abs() > 0.6 {
                        Color32::WHITE
                    } else {
                        Color32::BLACK
                    };
                    plot_ui.text(Text::new(
                        PlotPoint::new(x0 + 0.5, y0 + 0.5),
                        RichText::new(label).color(text_color).size(12.0),
                    ));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Bubble chart
// ---------------------------------------------------------------------------

/// GHI vs Tamb scatter of the sampled subset: bubble area tracks WS, bubble
/// color tracks RH on a viridis scale. Color-bar and size legends are drawn
/// beside the plot.
pub fn bubble_chart(ui: &mut Ui, sampled: &Table) {
    let (rh_min, rh_max) = finite_range(&sampled.column(Field::Rh)).unwrap_or((0.0, 100.0));

    ui.horizontal_top(|ui| {
        let legend_width = 120.0;
        let plot_width = (ui.available_width() - legend_width).max(200.0);

        Plot::new("bubble_chart")
            .width(plot_width)
            .height(320.0)
            .x_axis_label(Field::Ghi.label())
            .y_axis_label(Field::Tamb.label())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for record in &sampled.records {
                    if !record.ghi.is_finite() || !record.tamb.is_finite() {
                        continue;
                    }
                    let t = normalize(record.rh, rh_min, rh_max);
                    plot_ui.points(
                        Points::new(vec![[record.ghi, record.tamb]])
                            .radius(bubble_radius(record.ws))
                            .color(color::viridis(t).gamma_multiply(0.7)),
                    );
                }
            });

        ui.vertical(|ui| {
            color_bar_legend(ui, rh_min, rh_max);
            ui.add_space(8.0);
            size_legend(ui, &sampled.column(Field::Ws));
        });
    });
}

/// Screen radius for a wind-speed value, from the matplotlib area convention.
fn bubble_radius(ws: f64) -> f32 {
    if !ws.is_finite() || ws <= 0.0 {
        return 1.0;
    }
    ((ws * BUBBLE_AREA_SCALE) / std::f64::consts::PI).sqrt() as f32
}

/// Vertical RH color bar with min/max labels.
fn color_bar_legend(ui: &mut Ui, rh_min: f64, rh_max: f64) {
    ui.label(RichText::new("RH (%)").strong());
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(16.0, 120.0), Sense::hover());
        let painter = ui.painter();
        let gradient = color::viridis_gradient(40);
        let step_h = rect.height() / gradient.len() as f32;
        // top of the bar is the maximum
        for (s, &c) in gradient.iter().rev().enumerate() {
            let top = rect.top() + s as f32 * step_h;
            painter.rect_filled(
                egui::Rect::from_min_size(
                    egui::pos2(rect.left(), top),
                    vec2(rect.width(), step_h + 0.5),
                ),
                0.0,
                c,
            );
        }
        ui.vertical(|ui| {
            ui.label(format!("{rh_max:.0}"));
            ui.add_space(rect.height() - 2.0 * ui.text_style_height(&egui::TextStyle::Body));
            ui.label(format!("{rh_min:.0}"));
        });
    });
}

/// Four representative wind-speed bins rendered as sized dots.
fn size_legend(ui: &mut Ui, ws: &[f64]) {
    let Some((lo, hi)) = finite_range(ws) else {
        return;
    };
    ui.label(RichText::new("WS (m/s)").strong());
    for value in size_legend_bins(lo, hi) {
        ui.horizontal(|ui| {
            let r = bubble_radius(value);
            let (rect, _) = ui.allocate_exact_size(vec2(24.0, (2.0 * r).max(12.0)), Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), r, Color32::GRAY.gamma_multiply(0.8));
            ui.label(format!("{value:.1}"));
        });
    }
}

/// Four evenly spaced representative values over `[lo, hi]`.
fn size_legend_bins(lo: f64, hi: f64) -> Vec<f64> {
    if hi <= lo {
        return vec![lo];
    }
    (0..4)
        .map(|i| lo + (hi - lo) * (i as f64 + 0.5) / 4.0)
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter matrix
// ---------------------------------------------------------------------------

/// Pairwise grid over {GHI, DNI, DHI, WS, WSgust, WD}; diagonal cells show the
/// variable's distribution as a histogram.
pub fn scatter_matrix(ui: &mut Ui, table: &Table) {
    let k = MATRIX_FIELDS.len();
    let spacing = ui.spacing().item_spacing.x;
    let cell = ((ui.available_width() - spacing * (k as f32 + 1.0)) / k as f32).clamp(70.0, 160.0);

    let columns: Vec<Vec<f64>> = MATRIX_FIELDS.iter().map(|&f| table.column(f)).collect();

    egui::Grid::new("scatter_matrix")
        .spacing([spacing, spacing])
        .show(ui, |ui| {
            for (row, &fy) in MATRIX_FIELDS.iter().enumerate() {
                for (col, &fx) in MATRIX_FIELDS.iter().enumerate() {
                    matrix_cell(ui, table, row, col, fx, fy, &columns, cell);
                }
                ui.end_row();
            }
            // bottom axis labels
            for &fx in &MATRIX_FIELDS {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(fx.name()).small());
                });
            }
            ui.end_row();
        });
}

#[allow(clippy::too_many_arguments)]
fn matrix_cell(
    ui: &mut Ui,
    table: &Table,
    row: usize,
    col: usize,
    fx: Field,
    fy: Field,
    columns: &[Vec<f64>],
    cell: f32,
) {
    ui.vertical(|ui| {
        if col == 0 {
            ui.label(RichText::new(fy.name()).small());
        }
        let plot = Plot::new(("scatter_matrix", row, col))
            .width(cell)
            .height(cell)
            .show_axes([false, false])
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);

        if row == col {
            let bars = histogram(&columns[row], 20);
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
            });
        } else {
            let points: Vec<[f64; 2]> = table
                .records
                .iter()
                .map(|r| [r.value(fx), r.value(fy)])
                .filter(|[x, y]| x.is_finite() && y.is_finite())
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points)
                        .radius(1.0)
                        .color(Color32::LIGHT_BLUE.gamma_multiply(0.7)),
                );
            });
        }
    });
}

/// Fixed-width histogram bars over the finite values.
fn histogram(values: &[f64], n_bins: usize) -> Vec<Bar> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some((lo, hi)) = finite_range(&finite) else {
        return Vec::new();
    };
    if hi <= lo {
        return vec![Bar::new(lo, finite.len() as f64)];
    }

    let width = (hi - lo) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for v in &finite {
        let bin = (((v - lo) / width) as usize).min(n_bins - 1);
        counts[bin] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| Bar::new(lo + (i as f64 + 0.5) * width, c as f64).width(width * 0.95))
        .collect()
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Tick label for integer-aligned category axes; empty off the categories.
fn axis_name(fields: &[Field], value: f64, center_offset: f64) -> String {
    let idx = value - center_offset;
    if (idx - idx.round()).abs() > 1e-6 {
        return String::new();
    }
    let idx = idx.round();
    if idx < 0.0 || idx >= fields.len() as f64 {
        return String::new();
    }
    fields[idx as usize].name().to_string()
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if !value.is_finite() || hi <= lo {
        return 0.5;
    }
    (value - lo) / (hi - lo)
}
