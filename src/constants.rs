//! Tuning constants for hue extraction, layout, and rendering
//!
//! These values reproduce the reference collage look and are deliberately
//! compile-time constants; the layout and rendering values can be overridden
//! per run through [`crate::CollageConfig`].

/// Hue extraction parameters
pub mod extraction {
    /// Largest thumbnail dimension used during analysis.
    ///
    /// Images are downscaled so their longest side does not exceed this
    /// before pixel statistics are gathered. Purely a throughput
    /// optimization; the bounding-box resize preserves aspect ratio.
    pub const THUMBNAIL_MAX_DIM: u32 = 100;

    /// Minimum saturation for a pixel to count as colored
    pub const MIN_SATURATION: f32 = 0.1;

    /// Minimum value (brightness) for a pixel to count as colored
    pub const MIN_VALUE: f32 = 0.1;
}

/// Column layout parameters
pub mod layout {
    /// Base canvas scale for a roughly square result
    pub const FINAL_SIZE: u32 = 4000;

    /// Gap between images and around the canvas edge
    pub const PADDING: u32 = 4;

    /// Multiplier applied to sqrt(image count) when choosing column count
    pub const COLUMN_SCALE: f64 = 1.1;

    /// Chance that a portrait image keeps an extra-tall aspect ratio
    pub const TALL_PORTRAIT_CHANCE: f64 = 0.3;

    /// Chance that a landscape image keeps an extra-wide aspect ratio
    pub const WIDE_LANDSCAPE_CHANCE: f64 = 0.2;

    /// Portrait aspect-ratio bounds (height/width)
    pub const PORTRAIT_MIN: f64 = 0.5;
    pub const PORTRAIT_MAX: f64 = 2.0;
    pub const PORTRAIT_TALL_MAX: f64 = 4.0;

    /// Landscape/square aspect-ratio bounds (height/width)
    pub const LANDSCAPE_MIN: f64 = 0.5;
    pub const LANDSCAPE_MAX: f64 = 1.2;
    pub const LANDSCAPE_WIDE_MIN: f64 = 0.33;
}

/// Canvas rendering parameters
pub mod rendering {
    /// Dark blue canvas background (#15202B)
    pub const BG_COLOR: [u8; 3] = [21, 32, 43];

    /// 1-pixel border drawn around each placed image
    pub const BORDER_COLOR: [u8; 3] = [30, 30, 30];

    /// Side length of the color indicator dot in the top-right corner
    pub const INDICATOR_DOT_SIZE: u32 = 5;

    /// Inset of the indicator dot from the image corner
    pub const INDICATOR_MARGIN: u32 = 2;

    /// JPEG encode quality for the final collage
    pub const JPEG_QUALITY: u8 = 95;

    /// Saturation used when deriving an indicator color from hue alone
    pub const FALLBACK_SATURATION: f32 = 0.9;

    /// Value used when deriving an indicator color from hue alone
    pub const FALLBACK_VALUE: f32 = 0.9;
}
