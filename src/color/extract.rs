//! Representative hue extraction via weighted circular statistics
//!
//! Reduces an image to a single (hue, warmth, representative color) triple:
//! - Near-gray and near-black pixels are excluded entirely
//! - Remaining pixels are weighted by saturation × value
//! - The mean hue is computed on the unit circle (cos/sin sums) so that
//!   wraparound averages correctly — half 359° and half 1° yields 0°,
//!   not 180°

use std::path::Path;

use image::RgbImage;
use palette::{FromColor, Hsv, Srgb};
use tracing::warn;

use crate::color::warmth::normalize_degrees;
use crate::color::{warmth_value, ImageColorRecord};
use crate::constants::extraction::{MIN_SATURATION, MIN_VALUE, THUMBNAIL_MAX_DIM};
use crate::image_loader;

/// Analyze an image file, never failing.
///
/// Decode errors are logged and absorbed into a hue-0 fallback record so a
/// single unreadable file cannot block the pipeline. The image is
/// thumbnailed to at most [`THUMBNAIL_MAX_DIM`] on its longest side before
/// pixel statistics are gathered.
pub fn analyze_image(path: &Path) -> ImageColorRecord {
    match image_loader::load_image(path) {
        Ok(img) => {
            let thumb = img.thumbnail(THUMBNAIL_MAX_DIM, THUMBNAIL_MAX_DIM).to_rgb8();
            extract(&thumb, path)
        }
        Err(e) => {
            warn!("Error processing {}: {}", path.display(), e);
            ImageColorRecord::fallback(path)
        }
    }
}

/// Compute the weighted circular-mean hue of decoded pixel data.
///
/// # Arguments
///
/// * `pixels` - RGB pixel grid (already thumbnailed by the caller)
/// * `path` - Source path recorded on the result, not read
///
/// # Returns
///
/// An [`ImageColorRecord`] with hue in `[0, 360)`, its derived warmth, and
/// the weighted-average RGB of the qualifying pixels. When every pixel is
/// near-gray or near-black the hue-0 fallback record is returned.
pub fn extract(pixels: &RgbImage, path: &Path) -> ImageColorRecord {
    let mut x_sum = 0.0_f64;
    let mut y_sum = 0.0_f64;
    let mut weight_sum = 0.0_f64;
    let mut r_sum = 0.0_f64;
    let mut g_sum = 0.0_f64;
    let mut b_sum = 0.0_f64;

    for pixel in pixels.pixels() {
        let [r, g, b] = pixel.0;
        let hsv: Hsv = Hsv::from_color(Srgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ));

        // Near-gray pixels carry no usable hue information
        if hsv.saturation < MIN_SATURATION || hsv.value < MIN_VALUE {
            continue;
        }

        let weight = f64::from(hsv.saturation) * f64::from(hsv.value);
        let hue_rad = f64::from(hsv.hue.into_positive_degrees()).to_radians();

        x_sum += hue_rad.cos() * weight;
        y_sum += hue_rad.sin() * weight;
        weight_sum += weight;

        r_sum += f64::from(r) * weight;
        g_sum += f64::from(g) * weight;
        b_sum += f64::from(b) * weight;
    }

    if weight_sum == 0.0 {
        return ImageColorRecord::fallback(path);
    }

    let avg_hue = normalize_degrees(y_sum.atan2(x_sum).to_degrees());
    let representative = [
        (r_sum / weight_sum) as u8,
        (g_sum / weight_sum) as u8,
        (b_sum / weight_sum) as u8,
    ];

    ImageColorRecord {
        path: path.to_path_buf(),
        hue: avg_hue,
        warmth: warmth_value(avg_hue),
        representative: Some(representative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn test_pure_red_image() {
        let img = solid(10, 10, [255, 0, 0]);
        let record = extract(&img, Path::new("red.png"));

        assert!(record.hue.abs() < 1e-3);
        assert!((record.warmth - 1030.0).abs() < 0.01);
        assert_eq!(record.representative, Some([255, 0, 0]));
    }

    #[test]
    fn test_circular_mean_wraps_around_zero() {
        // Half the pixels just below 360°, half just above 0°, equal
        // saturation and value. A naive linear average would land near
        // 180°; the circular mean must land near 0°.
        let mut img = RgbImage::new(50, 2);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = if x % 2 == 0 {
                Rgb([255, 0, 4]) // hue ~359.1°
            } else {
                Rgb([255, 4, 0]) // hue ~0.9°
            };
        }

        let record = extract(&img, Path::new("wrap.png"));
        assert!(
            record.hue < 1.0 || record.hue > 359.0,
            "expected hue near 0°, got {}",
            record.hue
        );
        assert!(record.hue >= 0.0 && record.hue < 360.0);
    }

    #[test]
    fn test_all_gray_image_yields_fallback() {
        let img = solid(8, 8, [128, 128, 128]);
        let record = extract(&img, Path::new("gray.png"));

        assert_eq!(record.hue, 0.0);
        assert_eq!(record.warmth, warmth_value(0.0));
        assert!(record.representative.is_none());
    }

    #[test]
    fn test_near_black_pixels_are_excluded() {
        // Saturated but far too dark: value ~0.04 is under the threshold
        let img = solid(8, 8, [10, 0, 0]);
        let record = extract(&img, Path::new("dark.png"));
        assert!(record.representative.is_none());
    }

    #[test]
    fn test_saturation_value_weighting() {
        // A vivid green and a dim red; the green pixel's weight (~1.0)
        // should dominate the dim red's (~0.25), pulling the mean hue
        // well toward 120°.
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 255, 0]));
        img.put_pixel(1, 0, Rgb([64, 0, 0]));

        let record = extract(&img, Path::new("mix.png"));
        assert!(
            record.hue > 90.0 && record.hue < 120.0,
            "expected hue pulled toward green, got {}",
            record.hue
        );
    }

    #[test]
    fn test_representative_color_is_weighted_average() {
        let img = solid(4, 4, [200, 100, 50]);
        let record = extract(&img, Path::new("orange.png"));
        // Uniform image: the weighted average is the pixel itself
        assert_eq!(record.representative, Some([200, 100, 50]));
    }

    #[test]
    fn test_analyze_image_missing_file_falls_back() {
        let record = analyze_image(Path::new("definitely/not/a/file.jpg"));
        assert_eq!(record.hue, 0.0);
        assert_eq!(record.warmth, warmth_value(0.0));
        assert!(record.representative.is_none());
    }
}
