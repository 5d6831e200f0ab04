//! Canvas rendering
//!
//! Pastes each placement onto the background canvas, draws the 1-pixel
//! border and the corner indicator dot, and encodes the result. Rendering
//! is strictly sequential: the canvas has a single writer, and a failed
//! paste skips only that image (its slot stays background-colored because
//! the y positions were fixed during layout).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

use crate::constants::rendering::{INDICATOR_DOT_SIZE, INDICATOR_MARGIN};
use crate::error::{CollageError, Result};
use crate::image_loader;
use crate::layout::engine::{LayoutPlan, Placement};

/// Render a layout plan to an image file.
///
/// # Arguments
///
/// * `plan` - Placements and canvas dimensions from [`crate::layout::layout`]
/// * `quality` - JPEG quality used when `output` has a .jpg/.jpeg extension
/// * `output` - Destination path; non-JPEG extensions use the format's
///   default encoder settings
///
/// # Errors
///
/// Returns `CollageError::EncodeError` if the canvas cannot be written.
/// Per-image paste failures are logged and skipped, never fatal.
pub fn render(plan: &LayoutPlan, quality: u8, output: &Path) -> Result<()> {
    let mut canvas = RgbImage::from_pixel(
        plan.canvas.width,
        plan.canvas.height,
        Rgb(plan.canvas.background),
    );

    let mut placed = 0usize;
    for placement in &plan.placements {
        match paste(&mut canvas, placement) {
            Ok(()) => placed += 1,
            Err(e) => warn!("{}", e),
        }
    }
    debug!(
        "Pasted {placed}/{} images onto {}x{} canvas",
        plan.placements.len(),
        plan.canvas.width,
        plan.canvas.height
    );

    save(&canvas, quality, output)
}

/// Decode, resize, and blit one image, then draw its decorations
fn paste(canvas: &mut RgbImage, placement: &Placement) -> Result<()> {
    let img = image_loader::load_image(&placement.path)
        .map_err(|e| CollageError::PlacementError {
            path: placement.path.clone(),
            reason: e.to_string(),
        })?
        .to_rgb8();

    let resized = imageops::resize(
        &img,
        placement.width,
        placement.height,
        FilterType::Lanczos3,
    );
    imageops::replace(
        canvas,
        &resized,
        i64::from(placement.x),
        i64::from(placement.y),
    );

    draw_border(canvas, placement);
    draw_indicator(canvas, placement);
    Ok(())
}

/// 1-pixel rectangle outline just inside the placement bounds
fn draw_border(canvas: &mut RgbImage, placement: &Placement) {
    let color = Rgb(placement.border);
    let x1 = placement.x + placement.width - 1;
    let y1 = placement.y + placement.height - 1;

    for x in placement.x..=x1 {
        put_pixel_checked(canvas, x, placement.y, color);
        put_pixel_checked(canvas, x, y1, color);
    }
    for y in placement.y..=y1 {
        put_pixel_checked(canvas, placement.x, y, color);
        put_pixel_checked(canvas, x1, y, color);
    }
}

/// Filled square anchored at the placement's top-right corner
fn draw_indicator(canvas: &mut RgbImage, placement: &Placement) {
    if placement.width < INDICATOR_DOT_SIZE + INDICATOR_MARGIN {
        return;
    }
    let color = Rgb(placement.indicator);
    let left = placement.x + placement.width - INDICATOR_DOT_SIZE - INDICATOR_MARGIN;
    let top = placement.y + INDICATOR_MARGIN;

    for dy in 0..INDICATOR_DOT_SIZE {
        for dx in 0..INDICATOR_DOT_SIZE {
            put_pixel_checked(canvas, left + dx, top + dy, color);
        }
    }
}

fn put_pixel_checked(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}

/// Encode the canvas, honoring the JPEG quality for lossy output
fn save(canvas: &RgbImage, quality: u8, output: &Path) -> Result<()> {
    let is_jpeg = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_lowercase();
            lower == "jpg" || lower == "jpeg"
        })
        .unwrap_or(false);

    if is_jpeg {
        let file = File::create(output).map_err(|e| {
            CollageError::encode(format!("Failed to create {}", output.display()), e)
        })?;
        let writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(writer, quality);
        canvas.write_with_encoder(encoder).map_err(|e| {
            CollageError::encode(format!("Failed to encode {}", output.display()), e)
        })
    } else {
        canvas.save(output).map_err(|e| {
            CollageError::encode(format!("Failed to encode {}", output.display()), e)
        })
    }
}
