use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::ValueKey;

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Interpolate along evenly spaced colour stops in linear RGB.
fn ramp(stops: &[(f32, f32, f32)], t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segments = (stops.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(stops.len() - 2);
    let local = pos - idx as f32;

    let (r0, g0, b0) = stops[idx];
    let (r1, g1, b1) = stops[idx + 1];
    let a: LinSrgb = Srgb::new(r0, g0, b0).into_linear();
    let b: LinSrgb = Srgb::new(r1, g1, b1).into_linear();
    let rgb: Srgb = a.mix(b, local).into_color();
    to_color32(rgb)
}

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

/// Viridis anchor colours (sRGB).
const VIRIDIS: [(f32, f32, f32); 5] = [
    (0.267, 0.005, 0.329),
    (0.231, 0.322, 0.545),
    (0.129, 0.569, 0.549),
    (0.369, 0.788, 0.384),
    (0.993, 0.906, 0.144),
];

/// Blue – light grey – red, the usual "coolwarm" diverging scale.
const COOLWARM: [(f32, f32, f32); 3] = [
    (0.230, 0.299, 0.754),
    (0.865, 0.865, 0.865),
    (0.706, 0.016, 0.150),
];

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn categorical_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.65);
            to_color32(hsl.into_color())
        })
        .collect()
}

/// `n` colours running dark-purple → yellow, for ordered hue values.
pub fn sequential_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![ramp(&VIRIDIS, 0.5)],
        _ => (0..n)
            .map(|i| ramp(&VIRIDIS, i as f32 / (n - 1) as f32))
            .collect(),
    }
}

/// Colour for a correlation coefficient; the scale is centred at 0 over
/// [-1, 1]. Undefined coefficients are transparent.
pub fn diverging_color(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::TRANSPARENT;
    }
    ramp(&COOLWARM, ((value.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32)
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

// ---------------------------------------------------------------------------
// Colour mapping: hue value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the hue column to sequential colours.
#[derive(Debug, Clone)]
pub struct HueColors {
    mapping: BTreeMap<ValueKey, Color32>,
    default_color: Color32,
}

impl HueColors {
    pub fn new<'a>(values: impl IntoIterator<Item = &'a ValueKey>) -> Self {
        let keys: Vec<ValueKey> = values.into_iter().copied().collect();
        let palette = sequential_palette(keys.len());
        HueColors {
            mapping: keys.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: &ValueKey) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_have_requested_length() {
        assert!(categorical_palette(0).is_empty());
        assert_eq!(categorical_palette(6).len(), 6);
        assert_eq!(sequential_palette(1).len(), 1);
        assert_eq!(sequential_palette(12).len(), 12);
    }

    #[test]
    fn sequential_palette_colours_are_distinct() {
        let colours = sequential_palette(6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn diverging_scale_is_centred() {
        let neg = diverging_color(-1.0);
        let mid = diverging_color(0.0);
        let pos = diverging_color(1.0);
        assert!(neg.b() > neg.r());
        assert!(pos.r() > pos.b());
        assert!(mid.r().abs_diff(mid.b()) < 5);
        assert_eq!(diverging_color(f64::NAN), Color32::TRANSPARENT);
    }

    #[test]
    fn hue_colors_fall_back_to_grey() {
        let keys = [ValueKey(5.0), ValueKey(6.0)];
        let colors = HueColors::new(&keys);
        assert_ne!(colors.color_for(&ValueKey(5.0)), colors.color_for(&ValueKey(6.0)));
        assert_eq!(colors.color_for(&ValueKey(9.0)), Color32::GRAY);
    }
}
