use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct RGB triples using evenly spaced hues.
/// The first hue is a blue, so a single-series panel looks conventional.
pub fn generate_palette(n: usize) -> Vec<[u8; 3]> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// Colour of series `index` on a panel carrying `count` series, shared by
/// the window and PNG renderers so both draw the same figure.
pub fn series_rgb(index: usize, count: usize) -> [u8; 3] {
    generate_palette(count.max(1))
        .get(index)
        .copied()
        .unwrap_or([128, 128, 128])
}

pub fn series_color32(index: usize, count: usize) -> Color32 {
    let [r, g, b] = series_rgb(index, count);
    Color32::from_rgb(r, g, b)
}

pub fn series_plotters(index: usize, count: usize) -> RGBColor {
    let [r, g, b] = series_rgb(index, count);
    RGBColor(r, g, b)
}
