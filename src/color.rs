use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues. Used for
/// the box-plot fills.
pub fn categorical_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous color maps
// ---------------------------------------------------------------------------

// Viridis anchor points (matplotlib's default sequential map), evenly spaced
// over t ∈ [0, 1].
const VIRIDIS: [(f32, f32, f32); 7] = [
    (0.267, 0.005, 0.329),
    (0.283, 0.141, 0.458),
    (0.254, 0.265, 0.530),
    (0.207, 0.372, 0.553),
    (0.128, 0.567, 0.551),
    (0.369, 0.789, 0.383),
    (0.993, 0.906, 0.144),
];

// Coolwarm-style diverging anchors: blue → near-white → red.
const DIVERGING: [(f32, f32, f32); 3] = [
    (0.230, 0.299, 0.754),
    (0.865, 0.865, 0.865),
    (0.706, 0.016, 0.150),
];

/// Sample the viridis map at `t ∈ [0, 1]` (clamped).
pub fn viridis(t: f64) -> Color32 {
    sample_anchors(&VIRIDIS, t)
}

/// Diverging blue–white–red map for correlation values `r ∈ [-1, 1]`,
/// centered so `r = 0` lands on the neutral midpoint.
pub fn diverging(r: f64) -> Color32 {
    sample_anchors(&DIVERGING, (r + 1.0) / 2.0)
}

/// `n` evenly spaced viridis samples, low to high. Used to draw the
/// color-bar legend.
pub fn viridis_gradient(n: usize) -> Vec<Color32> {
    if n <= 1 {
        return vec![viridis(0.0)];
    }
    (0..n)
        .map(|i| viridis(i as f64 / (n - 1) as f64))
        .collect()
}

/// Piecewise-linear interpolation between evenly spaced RGB anchors.
fn sample_anchors(anchors: &[(f32, f32, f32)], t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let pos = t * (anchors.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(anchors.len() - 1);
    let frac = pos - lo as f32;

    let a: LinSrgb = Srgb::new(anchors[lo].0, anchors[lo].1, anchors[lo].2).into_linear();
    let b: LinSrgb = Srgb::new(anchors[hi].0, anchors[hi].1, anchors[hi].2).into_linear();
    let mixed: Srgb = Srgb::from_linear(a.mix(b, frac));
    Color32::from_rgb(
        (mixed.red * 255.0) as u8,
        (mixed.green * 255.0) as u8,
        (mixed.blue * 255.0) as u8,
    )
}
