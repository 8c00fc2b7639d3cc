use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Career",
    "Work sector",
    "Age",
    "Courses passed",
    "Weighted avg.",
    "Income",
    "AI tool",
    "Transport",
];

// ---------------------------------------------------------------------------
// Matching records (bottom panel)
// ---------------------------------------------------------------------------

/// Render the records behind the current charts.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new(format!("Matching records ({})", state.charts.indices.len()))
        .id_salt("records_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0), HEADERS.len())
                .max_scroll_height(220.0)
                .header(20.0, |mut header| {
                    for name in HEADERS {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, state.charts.indices.len(), |mut row| {
                        let rec = &state.dataset.records[state.charts.indices[row.index()]];
                        row.col(|ui: &mut Ui| {
                            ui.label(&rec.career);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&rec.sector);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(rec.age.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(rec.courses_passed.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.2}", rec.weighted_average));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.0}", rec.income_after_graduation));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&rec.preferred_ai_tool);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(&rec.transport_mode);
                        });
                    });
                });
        });
}
