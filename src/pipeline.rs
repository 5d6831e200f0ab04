//! End-to-end collage pipeline
//!
//! Discovery, parallel extraction, the stable warmth sort, layout, and
//! rendering, in that order. Extraction fans out across blocking worker
//! tasks and the results are reassembled into discovery order before the
//! sort, so equal-warmth ties always resolve the same way. Everything from
//! the sort onward is single-threaded.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::join_all;
use tracing::info;

use crate::color::{self, ImageColorRecord};
use crate::config::CollageConfig;
use crate::error::{CollageError, Result};
use crate::image_loader;
use crate::layout::{self, FileSizeProbe, LayoutParams, SplitMix64};

/// What a finished run produced, for caller-side reporting
#[derive(Debug, Clone)]
pub struct CollageSummary {
    /// Image files discovered under the root
    pub discovered: usize,
    /// Number of columns in the layout
    pub columns: usize,
    /// Final canvas width in pixels
    pub width: u32,
    /// Final canvas height in pixels
    pub height: u32,
    /// Where the collage was written
    pub output: PathBuf,
}

/// Generate a warmth-sorted collage from every image under `root`.
///
/// # Arguments
///
/// * `root` - Directory scanned recursively for supported image files
/// * `output` - Destination path for the rendered collage
/// * `config` - Canvas, padding, quality, seed, and worker settings
///
/// # Errors
///
/// Returns `CollageError::EmptyInput` when no image files are discovered.
/// Per-image decode/sizing/placement failures are absorbed with fallbacks
/// and never abort the run.
pub async fn generate_collage(
    root: &Path,
    output: &Path,
    config: &CollageConfig,
) -> Result<CollageSummary> {
    let paths = image_loader::find_image_files(root)?;
    if paths.is_empty() {
        return Err(CollageError::EmptyInput);
    }
    info!("Found {} images under {}", paths.len(), root.display());

    let discovered = paths.len();
    let workers = config.workers.unwrap_or_else(num_cpus::get);
    let mut records = extract_all(paths, workers).await?;

    sort_by_warmth(&mut records);
    info!("Sorted {} images by warmth", records.len());
    log_warmth_extremes(&records);

    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut jitter = SplitMix64::new(seed);
    let params = LayoutParams {
        final_size: config.final_size,
        padding: config.padding,
        background: config.background,
        border: config.border,
    };

    let plan = layout::layout(&records, &FileSizeProbe, &mut jitter, &params)?;
    info!(
        "Final collage dimensions: {}x{} pixels",
        plan.canvas.width, plan.canvas.height
    );

    layout::render(&plan, config.jpeg_quality, output)?;

    Ok(CollageSummary {
        discovered,
        columns: plan.columns,
        width: plan.canvas.width,
        height: plan.canvas.height,
        output: output.to_path_buf(),
    })
}

/// Run extraction across a pool of blocking workers.
///
/// Paths are dealt round-robin into one bucket per worker; each worker
/// analyzes its bucket sequentially and results are reassembled by
/// discovery index, so the returned order is independent of scheduling.
async fn extract_all(paths: Vec<PathBuf>, workers: usize) -> Result<Vec<ImageColorRecord>> {
    let n = paths.len();
    let worker_count = workers.clamp(1, n.max(1));

    let mut buckets: Vec<Vec<(usize, PathBuf)>> = vec![Vec::new(); worker_count];
    for (i, path) in paths.into_iter().enumerate() {
        buckets[i % worker_count].push((i, path));
    }

    let handles: Vec<_> = buckets
        .into_iter()
        .map(|bucket| {
            tokio::task::spawn_blocking(move || {
                bucket
                    .into_iter()
                    .map(|(i, path)| (i, color::analyze_image(&path)))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ordered: Vec<Option<ImageColorRecord>> = vec![None; n];
    for joined in join_all(handles).await {
        let chunk = joined.map_err(|e| CollageError::WorkerError {
            message: e.to_string(),
        })?;
        for (i, record) in chunk {
            ordered[i] = Some(record);
        }
    }

    Ok(ordered.into_iter().flatten().collect())
}

/// Stable descending-warmth sort; equal warmth keeps discovery order
fn sort_by_warmth(records: &mut [ImageColorRecord]) {
    records.sort_by(|a, b| b.warmth.partial_cmp(&a.warmth).unwrap_or(Ordering::Equal));
}

/// Log the ten warmest and ten coolest images for eyeballing the ordering
fn log_warmth_extremes(records: &[ImageColorRecord]) {
    for (idx, record) in records.iter().take(10).enumerate() {
        info!(
            "Top image {}: {}, hue: {:.1}, warmth: {:.1}",
            idx + 1,
            file_name(&record.path),
            record.hue,
            record.warmth
        );
    }
    let tail_start = records.len().saturating_sub(10);
    for (idx, record) in records[tail_start..].iter().enumerate() {
        info!(
            "Bottom image {}: {}, hue: {:.1}, warmth: {:.1}",
            idx + 1,
            file_name(&record.path),
            record.hue,
            record.warmth
        );
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Nanosecond clock seed for unseeded runs
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}
