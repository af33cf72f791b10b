use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour map
// ---------------------------------------------------------------------------

/// Colour of the annotation markers.
pub const MARKER_COLOR: Color32 = Color32::from_rgb(0, 128, 0);

/// One anchor of a piecewise-linear colour map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `[0, 1]`.
    pub position: f32,
    pub color: [u8; 3],
}

/// Blue → grey → red diverging map. Interpolation happens in linear RGB.
#[derive(Debug, Clone)]
pub struct ColorMap {
    stops: Vec<ColorStop>,
}

impl ColorMap {
    /// Build a map from stops sorted by position.
    pub fn from_stops(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// Moreland's cool-warm map sampled at five points.
    pub fn coolwarm() -> Self {
        Self::from_stops(vec![
            ColorStop { position: 0.0, color: [59, 76, 192] },
            ColorStop { position: 0.25, color: [141, 176, 254] },
            ColorStop { position: 0.5, color: [221, 221, 221] },
            ColorStop { position: 0.75, color: [244, 154, 123] },
            ColorStop { position: 1.0, color: [180, 4, 38] },
        ])
    }

    /// Colour at `t`, clamped to `[0, 1]`. NaN maps to the lowest stop.
    pub fn sample(&self, t: f32) -> [u8; 3] {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [128, 128, 128];
        };
        if t.is_nan() || t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        let idx = self.stops.partition_point(|s| s.position < t);
        let lower = &self.stops[idx - 1];
        let upper = &self.stops[idx];
        let f = (t - lower.position) / (upper.position - lower.position);

        let mixed = to_linear(lower.color).mix(to_linear(upper.color), f);
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        [rgb.red, rgb.green, rgb.blue]
    }

    /// Colour for `value` normalised over `[min, max]`, with opacity `alpha`.
    pub fn color_for(&self, value: f64, min: f64, max: f64, alpha: f32) -> Color32 {
        let range = max - min;
        let t = if range.abs() < f64::EPSILON {
            0.5
        } else {
            ((value - min) / range) as f32
        };
        let [r, g, b] = self.sample(t);
        Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

fn to_linear([r, g, b]: [u8; 3]) -> LinSrgb {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0).into_linear()
}
