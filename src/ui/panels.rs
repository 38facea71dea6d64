use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::loader::Dataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation panel: dataset selector, date range, all-time toggle.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.strong("Select a dataset");
    egui::ComboBox::from_id_salt("dataset_select")
        .selected_text(state.dataset.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for dataset in Dataset::ALL {
                if ui
                    .selectable_label(state.dataset == dataset, dataset.label())
                    .clicked()
                {
                    state.dataset = dataset;
                }
            }
        });

    ui.add_space(8.0);

    let Some((min, max)) = state.date_bounds else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Select date range");
    ui.add_enabled_ui(!state.all_time, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Start");
            ui.add(DatePickerButton::new(&mut state.start_date).id_salt("start_date"));
        });
        ui.horizontal(|ui: &mut Ui| {
            ui.label("End");
            ui.add(DatePickerButton::new(&mut state.end_date).id_salt("end_date"));
        });
    });
    ui.checkbox(&mut state.all_time, "Select all time range");

    // The pickers know nothing about the dataset's coverage.
    state.clamp_dates();

    ui.add_space(8.0);
    ui.label(RichText::new(format!("Coverage: {min} to {max}")).weak());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the load status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Dashboard | Solar Radiation Measurement");
        ui.separator();
        match &state.status_message {
            Some(msg) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {
                ui.label(format!("{}", state.dataset));
            }
        }
    });
}
