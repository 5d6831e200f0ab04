//! # Hue Collage
//!
//! A Rust crate for arranging image collections into a single collage
//! sorted by perceptual color warmth.
//!
//! Each image is reduced to one representative hue using saliency-weighted
//! circular statistics, scored on a fixed warmth scale (reds and oranges
//! warmest, cyan and blue coolest, magenta ramping back toward warm), and
//! packed into fixed-width columns so warm hues cluster at the top of the
//! canvas and cool hues at the bottom.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hue_collage::{generate_collage, CollageConfig};
//! use std::path::Path;
//!
//! # async fn run() -> hue_collage::Result<()> {
//! let config = CollageConfig::default();
//! let summary = generate_collage(
//!     Path::new("photos"),
//!     Path::new("photos/hue_collage.jpg"),
//!     &config,
//! )
//! .await?;
//! println!("{}x{} collage in {} columns", summary.width, summary.height, summary.columns);
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod layout;
pub mod pipeline;

pub use color::{analyze_image, warmth_value, ImageColorRecord};
pub use config::CollageConfig;
pub use error::{CollageError, Result};
pub use layout::{CanvasSpec, LayoutPlan, Placement};
pub use pipeline::{generate_collage, CollageSummary};
