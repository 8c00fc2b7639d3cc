use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("The dataset has no records.");
        return;
    }

    // Clone what we need so we can mutate state inside the closures.
    let careers = state.dataset.careers.clone();
    let sectors = state.dataset.sectors.clone();
    let (age_lo, age_hi) = state.dataset.age_bounds.unwrap_or((0, 0));

    // ---- Career ----
    ui.strong("Career");
    let current_career = state.selection.career.clone();
    egui::ComboBox::from_id_salt("career")
        .selected_text(&current_career)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for career in &careers {
                if ui
                    .selectable_label(current_career == *career, career)
                    .clicked()
                {
                    state.set_career(career);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Work sector ----
    ui.strong("Work sector");
    let current_sector = state.selection.sector.clone();
    egui::ComboBox::from_id_salt("sector")
        .selected_text(&current_sector)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for sector in &sectors {
                if ui
                    .selectable_label(current_sector == *sector, sector)
                    .clicked()
                {
                    state.set_sector(sector);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Age range ----
    ui.strong("Age range");
    let mut age_min = state.selection.age_min;
    let mut age_max = state.selection.age_max;
    ui.add(
        egui::Slider::new(&mut age_min, age_lo..=age_hi)
            .step_by(1.0)
            .text("from"),
    );
    ui.add(
        egui::Slider::new(&mut age_max, age_lo..=age_hi)
            .step_by(1.0)
            .text("to"),
    );
    state.set_age_range(age_min, age_max);

    if age_min > age_max {
        ui.label(RichText::new("Lower bound is above upper bound").color(Color32::YELLOW));
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} matching",
            state.dataset.len(),
            state.charts.matched()
        ));

        ui.separator();
        ui.label(RichText::new(state.source.display().to_string()).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick another survey file. On failure the current dataset stays loaded.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} careers, {} sectors)",
                    dataset.len(),
                    path.display(),
                    dataset.careers.len(),
                    dataset.sectors.len()
                );
                state.set_dataset(dataset, path);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
