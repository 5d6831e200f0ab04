//! Column-based collage layout module
//!
//! Packs a warmth-sorted image sequence into fixed-width columns with
//! bounded pseudo-random aspect distortion, then renders the resulting
//! placements onto a single canvas.

pub mod engine;
pub mod jitter;
pub mod render;

pub use engine::{
    layout, CanvasSpec, FileSizeProbe, LayoutParams, LayoutPlan, Placement, SizeProbe,
};
pub use jitter::{Jitter, SplitMix64};
pub use render::render;
