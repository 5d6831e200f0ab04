//! Column layout computation
//!
//! Distributes a warmth-sorted record sequence into fixed-width columns by
//! round-robin, sizes each image with bounded pseudo-random aspect
//! distortion, and produces absolute placement rectangles plus the final
//! canvas dimensions. Column height accumulation is an explicit per-column
//! pass: each placement's y position depends on the running total of the
//! placements above it.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::color::ImageColorRecord;
use crate::constants::{layout as defaults, rendering};
use crate::error::{CollageError, Result};
use crate::image_loader;
use crate::layout::jitter::Jitter;

/// Fixed parameters for one layout run
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Base canvas scale; columns divide this width
    pub final_size: u32,
    /// Gap between images and around the canvas edge
    pub padding: u32,
    /// Canvas background color
    pub background: [u8; 3],
    /// Per-image border color
    pub border: [u8; 3],
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            final_size: defaults::FINAL_SIZE,
            padding: defaults::PADDING,
            background: rendering::BG_COLOR,
            border: rendering::BORDER_COLOR,
        }
    }
}

/// Absolute placement of one image on the canvas, with its decoration
#[derive(Debug, Clone)]
pub struct Placement {
    /// Column index the image was assigned to
    pub column: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Source file to paste into this rectangle
    pub path: PathBuf,
    /// 1-pixel border color
    pub border: [u8; 3],
    /// Fill of the corner indicator dot
    pub indicator: [u8; 3],
}

/// Final canvas dimensions and background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
}

/// Complete result of one layout run
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    /// Placements in column-major order (column 0 top-to-bottom first)
    pub placements: Vec<Placement>,
    pub canvas: CanvasSpec,
    pub columns: usize,
}

/// Native-dimension lookup for layout sizing.
///
/// Separated behind a trait so tests can script exact dimensions without
/// touching the filesystem.
pub trait SizeProbe {
    /// Native (width, height) of the image at `path`
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)>;
}

/// Production probe reading dimensions from image file headers
pub struct FileSizeProbe;

impl SizeProbe for FileSizeProbe {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        image_loader::read_dimensions(path)
    }
}

/// Number of columns for `n` images
pub fn column_count(n: usize) -> usize {
    (((n as f64).sqrt() * defaults::COLUMN_SCALE) as usize).max(1)
}

/// Round-robin distribution of `n` sorted indices over `num_cols` columns.
///
/// Image `i` lands in column `i % num_cols`, so every column spans the full
/// warmth range instead of isolating the extremes into single columns.
pub fn assign_columns(n: usize, num_cols: usize) -> Vec<Vec<usize>> {
    let mut columns = vec![Vec::new(); num_cols];
    for i in 0..n {
        columns[i % num_cols].push(i);
    }
    columns
}

/// Apply the bounded pseudo-random aspect distortion.
///
/// Portrait images (ratio > 1) stay within [0.5, 2.0], or [0.5, 4.0] with
/// probability 0.3 for the occasional very tall placement. Landscape and
/// square images stay within [0.5, 1.2], or [0.33, 1.2] with probability
/// 0.2 for the occasional very wide one. The distortion is stylistic; only
/// the bounds are contractual.
pub fn distort_aspect(aspect: f64, jitter: &mut dyn Jitter) -> f64 {
    if aspect > 1.0 {
        if jitter.next_unit() < defaults::TALL_PORTRAIT_CHANCE {
            aspect.clamp(defaults::PORTRAIT_MIN, defaults::PORTRAIT_TALL_MAX)
        } else {
            aspect.clamp(defaults::PORTRAIT_MIN, defaults::PORTRAIT_MAX)
        }
    } else if jitter.next_unit() < defaults::WIDE_LANDSCAPE_CHANCE {
        aspect.clamp(defaults::LANDSCAPE_WIDE_MIN, defaults::LANDSCAPE_MAX)
    } else {
        aspect.clamp(defaults::LANDSCAPE_MIN, defaults::LANDSCAPE_MAX)
    }
}

/// Compute placements and canvas dimensions for a warmth-sorted sequence.
///
/// # Arguments
///
/// * `records` - Records sorted by descending warmth
/// * `probe` - Native-dimension lookup
/// * `jitter` - Random source for aspect distortion; seed it to reproduce
///   a layout exactly
/// * `params` - Canvas scale, padding, and decoration colors
///
/// # Errors
///
/// Returns `CollageError::EmptyInput` for an empty sequence and
/// `CollageError::LayoutError` when the parameters leave no room for
/// columns. Per-image sizing failures are absorbed: the image falls back
/// to a square of the column width and the run continues.
pub fn layout(
    records: &[ImageColorRecord],
    probe: &dyn SizeProbe,
    jitter: &mut dyn Jitter,
    params: &LayoutParams,
) -> Result<LayoutPlan> {
    let n = records.len();
    if n == 0 {
        return Err(CollageError::EmptyInput);
    }

    let num_cols = column_count(n);
    let images_per_col = n.div_ceil(num_cols);
    info!("Using {num_cols} columns with ~{images_per_col} images per column");

    let total_padding = (num_cols as u32 + 1) * params.padding;
    if params.final_size <= total_padding {
        return Err(CollageError::LayoutError {
            reason: format!(
                "final size {} leaves no room for {} columns of padding {}",
                params.final_size, num_cols, params.padding
            ),
        });
    }
    let col_width = (params.final_size - total_padding) / num_cols as u32;
    if col_width == 0 {
        return Err(CollageError::LayoutError {
            reason: format!("column width is zero for {num_cols} columns"),
        });
    }

    let columns = assign_columns(n, num_cols);

    // First pass: target heights and cumulative column heights
    let mut column_heights = vec![0u32; num_cols];
    let mut target_heights: Vec<Vec<u32>> = Vec::with_capacity(num_cols);

    for (col, members) in columns.iter().enumerate() {
        let mut heights = Vec::with_capacity(members.len());
        for &idx in members {
            let record = &records[idx];
            let height = match probe.dimensions(&record.path) {
                Ok((w, h)) if w > 0 => {
                    let aspect = f64::from(h) / f64::from(w);
                    let clamped = distort_aspect(aspect, jitter);
                    (f64::from(col_width) * clamped).round() as u32
                }
                Ok(_) => {
                    warn!(
                        "Error sizing {}: zero-width image, using square",
                        record.path.display()
                    );
                    col_width
                }
                Err(e) => {
                    warn!("Error sizing {}: {}", record.path.display(), e);
                    col_width
                }
            };
            heights.push(height);
            column_heights[col] += height + params.padding;
        }
        target_heights.push(heights);
    }

    let canvas = CanvasSpec {
        width: col_width * num_cols as u32 + (num_cols as u32 + 1) * params.padding,
        height: column_heights.iter().copied().max().unwrap_or(0) + params.padding,
        background: params.background,
    };

    // Second pass: walk each column top to bottom assigning positions
    let mut placements = Vec::with_capacity(n);
    for (col, members) in columns.iter().enumerate() {
        let x = params.padding + col as u32 * (col_width + params.padding);
        let mut y = params.padding;
        for (pos, &idx) in members.iter().enumerate() {
            let record = &records[idx];
            let height = target_heights[col][pos];
            placements.push(Placement {
                column: col,
                x,
                y,
                width: col_width,
                height,
                path: record.path.clone(),
                border: params.border,
                indicator: record.indicator_color(),
            });
            y += height + params.padding;
        }
    }

    Ok(LayoutPlan {
        placements,
        canvas,
        columns: num_cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::warmth_value;
    use std::collections::HashMap;

    /// Jitter returning a scripted sequence, cycling when exhausted
    struct FixedJitter {
        values: Vec<f64>,
        next: usize,
    }

    impl FixedJitter {
        fn new(values: Vec<f64>) -> Self {
            Self { values, next: 0 }
        }

        fn constant(value: f64) -> Self {
            Self::new(vec![value])
        }
    }

    impl Jitter for FixedJitter {
        fn next_unit(&mut self) -> f64 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }
    }

    struct MapSizeProbe {
        sizes: HashMap<PathBuf, (u32, u32)>,
    }

    impl SizeProbe for MapSizeProbe {
        fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
            self.sizes
                .get(path)
                .copied()
                .ok_or_else(|| CollageError::SizingError {
                    path: path.to_path_buf(),
                    reason: "no such file".into(),
                })
        }
    }

    fn record(name: &str, hue: f64) -> ImageColorRecord {
        ImageColorRecord {
            path: PathBuf::from(name),
            hue,
            warmth: warmth_value(hue),
            representative: Some([128, 64, 32]),
        }
    }

    fn probe_of(entries: &[(&str, (u32, u32))]) -> MapSizeProbe {
        MapSizeProbe {
            sizes: entries
                .iter()
                .map(|(name, size)| (PathBuf::from(*name), *size))
                .collect(),
        }
    }

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(1), 1);
        assert_eq!(column_count(4), 2);
        assert_eq!(column_count(7), 2);
        assert_eq!(column_count(100), 11);
    }

    #[test]
    fn test_round_robin_assignment() {
        let columns = assign_columns(7, 3);
        assert_eq!(columns, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn test_round_robin_preserves_order_within_column() {
        let columns = assign_columns(10, 4);
        for col in &columns {
            assert!(col.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_distort_aspect_portrait_branches() {
        // Draw below the tall threshold: wide portrait bound applies
        let mut tall = FixedJitter::constant(0.1);
        assert_eq!(distort_aspect(3.0, &mut tall), 3.0);
        assert_eq!(distort_aspect(5.0, &mut tall), 4.0);

        // Draw above it: standard portrait bound applies
        let mut standard = FixedJitter::constant(0.9);
        assert_eq!(distort_aspect(3.0, &mut standard), 2.0);
        assert_eq!(distort_aspect(1.5, &mut standard), 1.5);
    }

    #[test]
    fn test_distort_aspect_landscape_branches() {
        // Draw below the wide threshold: extended lower bound applies
        let mut wide = FixedJitter::constant(0.1);
        assert_eq!(distort_aspect(0.2, &mut wide), 0.33);
        assert_eq!(distort_aspect(0.4, &mut wide), 0.4);

        // Draw above it: standard landscape bounds apply
        let mut standard = FixedJitter::constant(0.9);
        assert_eq!(distort_aspect(0.2, &mut standard), 0.5);
        assert_eq!(distort_aspect(1.0, &mut standard), 1.0);
    }

    #[test]
    fn test_distort_aspect_always_within_bounds() {
        let ratios = [0.05, 0.33, 0.5, 0.9, 1.0, 1.01, 1.9, 2.5, 4.0, 9.0];
        let draws = [0.0, 0.15, 0.25, 0.35, 0.75, 0.999];
        for &aspect in &ratios {
            for &draw in &draws {
                let mut jitter = FixedJitter::constant(draw);
                let clamped = distort_aspect(aspect, &mut jitter);
                if aspect > 1.0 {
                    assert!((0.5..=4.0).contains(&clamped));
                } else {
                    assert!((0.33..=1.2).contains(&clamped));
                }
            }
        }
    }

    #[test]
    fn test_single_column_heights_and_positions() {
        // Three images in one column, column width 100, padding 4.
        // Scripted draw 0.9 keeps every aspect on its standard branch, so
        // target heights come out exactly 100, 150, 80.
        let records = vec![record("a.png", 10.0), record("b.png", 40.0), record("c.png", 200.0)];
        let probe = probe_of(&[
            ("a.png", (100, 100)),
            ("b.png", (100, 150)),
            ("c.png", (100, 80)),
        ]);
        let params = LayoutParams {
            final_size: 108,
            padding: 4,
            ..LayoutParams::default()
        };
        let mut jitter = FixedJitter::constant(0.9);

        let plan = layout(&records, &probe, &mut jitter, &params).unwrap();

        assert_eq!(plan.columns, 1);
        let ys: Vec<u32> = plan.placements.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![4, 108, 262]);
        let heights: Vec<u32> = plan.placements.iter().map(|p| p.height).collect();
        assert_eq!(heights, vec![100, 150, 80]);
        assert_eq!(plan.canvas.height, 346);
        assert_eq!(plan.canvas.width, 108);
    }

    #[test]
    fn test_canvas_closed_form() {
        // Six square 40x30 images: aspect 0.75 survives both landscape
        // branches unchanged, so the plan is independent of the draws.
        let names = ["0.png", "1.png", "2.png", "3.png", "4.png", "5.png"];
        let records: Vec<_> = names.iter().map(|n| record(n, 100.0)).collect();
        let probe = probe_of(&names.iter().map(|n| (*n, (40, 30))).collect::<Vec<_>>());
        let params = LayoutParams::default();
        let mut jitter = FixedJitter::constant(0.5);

        let plan = layout(&records, &probe, &mut jitter, &params).unwrap();

        let num_cols = plan.columns as u32;
        assert_eq!(num_cols, 2);
        let col_width = (params.final_size - (num_cols + 1) * params.padding) / num_cols;
        assert_eq!(
            plan.canvas.width,
            col_width * num_cols + (num_cols + 1) * params.padding
        );

        // Each column holds three images of height round(col_width * 0.75)
        let target_h = (f64::from(col_width) * 0.75).round() as u32;
        assert_eq!(plan.canvas.height, 3 * (target_h + params.padding) + params.padding);
    }

    #[test]
    fn test_x_constant_per_column() {
        let names = ["0.png", "1.png", "2.png", "3.png", "4.png", "5.png"];
        let records: Vec<_> = names.iter().map(|n| record(n, 50.0)).collect();
        let probe = probe_of(&names.iter().map(|n| (*n, (100, 100))).collect::<Vec<_>>());
        let params = LayoutParams::default();
        let mut jitter = FixedJitter::constant(0.9);

        let plan = layout(&records, &probe, &mut jitter, &params).unwrap();

        let col_width = plan.placements[0].width;
        for p in &plan.placements {
            let expected = params.padding + p.column as u32 * (col_width + params.padding);
            assert_eq!(p.x, expected);
        }
    }

    #[test]
    fn test_empty_input() {
        let probe = probe_of(&[]);
        let mut jitter = FixedJitter::constant(0.5);
        let result = layout(&[], &probe, &mut jitter, &LayoutParams::default());
        assert!(matches!(result, Err(CollageError::EmptyInput)));
    }

    #[test]
    fn test_sizing_failure_falls_back_to_square() {
        // b.png is unknown to the probe; it must still occupy a square
        // slot of the column width rather than aborting the run.
        let records = vec![record("a.png", 10.0), record("b.png", 20.0)];
        let probe = probe_of(&[("a.png", (100, 100))]);
        let params = LayoutParams {
            final_size: 108,
            padding: 4,
            ..LayoutParams::default()
        };
        let mut jitter = FixedJitter::constant(0.9);

        let plan = layout(&records, &probe, &mut jitter, &params).unwrap();

        assert_eq!(plan.placements.len(), 2);
        let fallback = plan
            .placements
            .iter()
            .find(|p| p.path == Path::new("b.png"))
            .unwrap();
        assert_eq!(fallback.height, fallback.width);
    }

    #[test]
    fn test_too_small_final_size_is_rejected() {
        let records = vec![record("a.png", 10.0)];
        let probe = probe_of(&[("a.png", (100, 100))]);
        let params = LayoutParams {
            final_size: 8,
            padding: 4,
            ..LayoutParams::default()
        };
        let mut jitter = FixedJitter::constant(0.9);

        let result = layout(&records, &probe, &mut jitter, &params);
        assert!(matches!(result, Err(CollageError::LayoutError { .. })));
    }

    #[test]
    fn test_indicator_color_carried_onto_placement() {
        let records = vec![record("a.png", 10.0)];
        let probe = probe_of(&[("a.png", (100, 100))]);
        let mut jitter = FixedJitter::constant(0.9);

        let plan = layout(&records, &probe, &mut jitter, &LayoutParams::default()).unwrap();
        assert_eq!(plan.placements[0].indicator, [128, 64, 32]);
    }
}
