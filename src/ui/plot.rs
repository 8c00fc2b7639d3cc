use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Sense, Shape, Stroke, Ui, vec2};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::charts::{CategoryCount, ChartData, ChartKind, ChartSpec};
use crate::color::ColorMap;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the four charts as a 2×2 grid.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let row_height = ((ui.available_height() - 60.0) / 2.0).max(120.0);
    let specs: Vec<&ChartSpec> = state.charts.iter().collect();

    for pair in specs.chunks(2) {
        ui.columns(2, |cols: &mut [Ui]| {
            for (col, spec) in cols.iter_mut().zip(pair) {
                chart_cell(col, spec, row_height);
            }
        });
        ui.add_space(8.0);
    }
}

/// Title plus chart body, or a placeholder when nothing matched.
fn chart_cell(ui: &mut Ui, spec: &ChartSpec, height: f32) {
    ui.strong(spec.title);

    if spec.is_empty() {
        let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_stroke(
            rect,
            4.0,
            Stroke::new(1.0, Color32::from_gray(80)),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No data for this selection",
            egui::FontId::proportional(14.0),
            Color32::GRAY,
        );
        return;
    }

    match (&spec.kind, &spec.data) {
        (ChartKind::Bar, ChartData::Counts(counts)) => bar_chart(ui, spec, counts, height),
        (ChartKind::Scatter, ChartData::Points(points)) => {
            scatter_chart(ui, spec, points, height)
        }
        (ChartKind::Pie { hole }, ChartData::Counts(counts)) => {
            donut_chart(ui, counts, *hole as f32, height)
        }
        _ => {
            ui.label(format!("Cannot draw {:?} from this data", spec.kind));
        }
    }
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, spec: &ChartSpec, counts: &[CategoryCount], height: f32) {
    let colors = ColorMap::new(counts);
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.label)
                .fill(colors.color_for(&c.label))
                .width(0.7)
        })
        .collect();

    // Categories sit at integer positions; label only those ticks.
    let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();

    Plot::new(spec.title)
        .height(height)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v >= 0.0 && (v - v.round()).abs() < 1e-6 {
                labels.get(v.round() as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(spec.y_label));
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, spec: &ChartSpec, points: &[[f64; 2]], height: f32) {
    let points: PlotPoints = points.iter().copied().collect();

    Plot::new(spec.title)
        .height(height)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(3.5)
                    .color(Color32::LIGHT_BLUE)
                    .name("students"),
            );
        });
}

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

/// Angular resolution of the donut outline.
const SEGMENT_ANGLE: f32 = TAU / 180.0;

fn donut_chart(ui: &mut Ui, counts: &[CategoryCount], hole: f32, height: f32) {
    let colors = ColorMap::new(counts);
    let total: usize = counts.iter().map(|c| c.count).sum();

    ui.horizontal(|ui: &mut Ui| {
        let size = height.min(ui.available_width() * 0.6);
        let (rect, _) = ui.allocate_exact_size(vec2(size, size), Sense::hover());
        let painter = ui.painter_at(rect);

        let center = rect.center();
        let outer = size * 0.45;
        let inner = outer * hole.clamp(0.0, 0.95);
        let at = |radius: f32, angle: f32| center + radius * vec2(angle.cos(), angle.sin());

        // Start at twelve o'clock, clockwise.
        let mut start = -FRAC_PI_2;
        for c in counts {
            let sweep = TAU * c.count as f32 / total as f32;
            let steps = ((sweep / SEGMENT_ANGLE).ceil() as usize).max(1);
            let color = colors.color_for(&c.label);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![at(outer, a0), at(outer, a1), at(inner, a1), at(inner, a0)],
                    color,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }

        // Legend with shares.
        ui.vertical(|ui: &mut Ui| {
            for c in counts {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, colors.color_for(&c.label));
                    let share = 100.0 * c.count as f64 / total as f64;
                    ui.label(format!("{}  {share:.1}%", c.label));
                });
            }
        });
    });
}
