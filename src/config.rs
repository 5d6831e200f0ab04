//! Configuration for a collage run
//!
//! All tunable parameters in one serializable struct. Values default to the
//! reference collage look; a JSON file can override any of them:
//!
//! ```no_run
//! use hue_collage::CollageConfig;
//! use std::path::Path;
//!
//! let config = CollageConfig::from_json_file(Path::new("collage.json"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{layout, rendering};

/// Complete configuration for one collage generation run.
///
/// Serializable to JSON for reproducible runs; `seed` pins the aspect
/// distortion so two runs over the same inputs produce the same layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollageConfig {
    /// Base canvas scale (the collage width target)
    pub final_size: u32,

    /// Gap between images and around the canvas edge
    pub padding: u32,

    /// Canvas background color (RGB)
    pub background: [u8; 3],

    /// Per-image border color (RGB)
    pub border: [u8; 3],

    /// JPEG encode quality for the final collage
    pub jpeg_quality: u8,

    /// Seed for the aspect-ratio distortion; random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Extraction worker count override; defaults to the logical CPU count
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            final_size: layout::FINAL_SIZE,
            padding: layout::PADDING,
            background: rendering::BG_COLOR,
            border: rendering::BORDER_COLOR,
            jpeg_quality: rendering::JPEG_QUALITY,
            seed: None,
            workers: None,
        }
    }
}

impl CollageConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
