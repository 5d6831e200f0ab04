//! Hue-to-warmth scoring and hue-angle helpers
//!
//! The warmth function is a piecewise mapping from hue angle to a scalar
//! where higher means perceptually warmer: reds and oranges rank highest,
//! cyan/blue lowest, and magenta ramps back toward warm as hue approaches
//! 360°. The breakpoints and coefficients are domain-tuned constants and
//! every boundary is half-open `[low, high)`.

use palette::{FromColor, Hsv, Srgb};

/// Normalize an angle in degrees into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// Map a hue angle (degrees) to its warmth score.
///
/// Accepts any finite angle; the hue is normalized into `[0, 360)` first.
///
/// | hue range (°) | score                   |
/// |---------------|-------------------------|
/// | [0, 30)       | 1000 + (30 − hue)       |
/// | [30, 60)      | 970 + (60 − hue)        |
/// | [60, 180)     | 940 − (hue − 60)        |
/// | [180, 240)    | 820 − (hue − 180) × 1.5 |
/// | [240, 300)    | 730 − (hue − 240) × 0.5 |
/// | [300, 360)    | 730 + (hue − 300) × 0.9 |
pub fn warmth_value(hue: f64) -> f64 {
    let hue = normalize_degrees(hue);

    if hue < 30.0 {
        // Red to orange, warmest
        1000.0 + (30.0 - hue)
    } else if hue < 60.0 {
        // Orange to yellow
        970.0 + (60.0 - hue)
    } else if hue < 180.0 {
        // Yellow through green to cyan
        940.0 - (hue - 60.0)
    } else if hue < 240.0 {
        // Cyan to blue, coolest
        820.0 - (hue - 180.0) * 1.5
    } else if hue < 300.0 {
        // Blue to magenta
        730.0 - (hue - 240.0) * 0.5
    } else {
        // Magenta back toward red
        730.0 + (hue - 300.0) * 0.9
    }
}

/// Convert a hue angle plus fixed saturation/value to an RGB triple
pub fn hue_to_rgb(hue: f64, saturation: f32, value: f32) -> [u8; 3] {
    let hsv: Hsv = Hsv::new(normalize_degrees(hue) as f32, saturation, value);
    let rgb: Srgb = Srgb::from_color(hsv);
    let rgb = rgb.into_format::<u8>();
    [rgb.red, rgb.green, rgb.blue]
}
