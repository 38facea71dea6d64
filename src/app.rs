use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{charts, panels, summary};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SolarDashApp {
    pub state: AppState,
}

impl Default for SolarDashApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for SolarDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("navigation")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &mut self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Dashboard body
// ---------------------------------------------------------------------------

/// Run the pipeline for the current selections and lay out the five views:
/// statistics table and summary plot and heatmap in the middle column, bubble
/// chart and scatter matrix on the right.
fn dashboard(ui: &mut egui::Ui, state: &mut AppState) {
    if state.load_selected().is_none() {
        ui.centered_and_justified(|ui: &mut egui::Ui| {
            ui.heading("Could not load the selected dataset.");
        });
        return;
    }
    let Some((start, end)) = state.effective_range() else {
        return;
    };

    let dataset = state.dataset;
    let filtered = match state.cache.filtered(dataset, start, end) {
        Ok(table) => table,
        Err(e) => {
            state.status_message = Some(format!("Error: {e:#}"));
            return;
        }
    };

    if filtered.is_empty() {
        ui.centered_and_justified(|ui: &mut egui::Ui| {
            ui.label("No data available for the selected date range.");
        });
        return;
    }

    let bubble = match state
        .cache
        .bubble(dataset, start, end, &mut rand::thread_rng())
    {
        Ok(table) => table,
        Err(e) => {
            state.status_message = Some(format!("Error: {e:#}"));
            return;
        }
    };

    ui.columns(2, |columns| {
        ScrollArea::vertical()
            .id_salt("middle_column")
            .auto_shrink([false, false])
            .show(&mut columns[0], |ui: &mut egui::Ui| {
                ui.heading(format!("Summary Statistics – {}", dataset.file_name()));
                summary::statistics_grid(ui, &filtered);

                ui.add_space(12.0);
                ui.heading("Summary Plot");
                charts::summary_box_plot(ui, &filtered);

                ui.add_space(12.0);
                ui.heading("Correlation Heatmap");
                charts::correlation_heatmap(ui, &filtered);
            });

        ScrollArea::vertical()
            .id_salt("right_column")
            .auto_shrink([false, false])
            .show(&mut columns[1], |ui: &mut egui::Ui| {
                ui.heading("Bubble Chart");
                charts::bubble_chart(ui, &bubble);

                ui.add_space(12.0);
                ui.heading("Scatter Matrix");
                charts::scatter_matrix(ui, &filtered);
            });
    });
}
