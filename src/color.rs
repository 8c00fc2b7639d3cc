use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::charts::CategoryCount;

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Assigns one colour per category of a chart, in the chart's own order.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the categories of one chart, spreading the
    /// hues evenly around the wheel.
    pub fn new(categories: &[CategoryCount]) -> Self {
        let step = 360.0 / categories.len().max(1) as f32;
        let mapping = categories
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let rgb: Srgb = Hsl::new(i as f32 * step, 0.65, 0.55).into_color();
                let color = Color32::from_rgb(
                    (rgb.red * 255.0) as u8,
                    (rgb.green * 255.0) as u8,
                    (rgb.blue * 255.0) as u8,
                );
                (c.label.clone(), color)
            })
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}
