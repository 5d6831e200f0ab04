//! Hue analysis and warmth scoring module
//!
//! This module reduces an image to a single representative hue, a derived
//! warmth score used for sorting, and a representative display color.

pub mod extract;
pub mod warmth;

pub use extract::analyze_image;
pub use warmth::warmth_value;

use std::path::{Path, PathBuf};

use crate::constants::rendering;

/// Color summary for one image, produced once by extraction and immutable
/// afterward.
///
/// `warmth` is always derived from `hue` via [`warmth_value`], and `hue` is
/// always normalized into `[0, 360)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageColorRecord {
    /// Source file; never interpreted beyond load/size lookups
    pub path: PathBuf,
    /// Weighted circular-mean hue in degrees, `[0, 360)`
    pub hue: f64,
    /// Derived warmth score; higher = perceptually warmer
    pub warmth: f64,
    /// Saliency-weighted average RGB, absent when no colored pixel existed
    pub representative: Option<[u8; 3]>,
}

impl ImageColorRecord {
    /// Fallback record for unreadable or fully gray images.
    ///
    /// Hue 0 sorts these with the warmest reds, matching the reference
    /// behavior of never dropping an image from the collage.
    pub fn fallback(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            hue: 0.0,
            warmth: warmth_value(0.0),
            representative: None,
        }
    }

    /// Color for the corner indicator dot.
    ///
    /// Uses the representative color when present; otherwise derives a
    /// vivid color from the hue at fixed saturation/value. The fallback is
    /// intentionally saturated rather than gray so hue-only records remain
    /// legible on the canvas.
    pub fn indicator_color(&self) -> [u8; 3] {
        self.representative.unwrap_or_else(|| {
            warmth::hue_to_rgb(
                self.hue,
                rendering::FALLBACK_SATURATION,
                rendering::FALLBACK_VALUE,
            )
        })
    }
}
