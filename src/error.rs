//! Error types for the hue_collage library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hue_collage operations
pub type Result<T> = std::result::Result<T, CollageError>;

/// Comprehensive error types for collage generation
#[derive(Error, Debug)]
pub enum CollageError {
    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Native dimensions could not be read during layout sizing
    #[error("Failed to read dimensions of {}: {reason}", .path.display())]
    SizingError { path: PathBuf, reason: String },

    /// A single image could not be pasted onto the canvas
    #[error("Failed to place {}: {reason}", .path.display())]
    PlacementError { path: PathBuf, reason: String },

    /// No images were discovered, so there is nothing to lay out
    #[error("No images found to create a collage")]
    EmptyInput,

    /// Layout geometry could not be computed
    #[error("Layout error: {reason}")]
    LayoutError { reason: String },

    /// Final canvas could not be encoded or written
    #[error("Failed to write collage: {message}")]
    EncodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An extraction worker task failed to complete
    #[error("Extraction worker failed: {message}")]
    WorkerError { message: String },

    /// Directory scan failed
    #[error("Failed to scan {}: {source}", .path.display())]
    ScanError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CollageError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an encode error with context
    pub fn encode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::EncodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error is absorbed per-image rather than failing the batch
    ///
    /// Decode, sizing, and placement failures are logged and defaulted so a
    /// single bad file never aborts the run. Everything else is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CollageError::ImageLoadError { .. }
                | CollageError::SizingError { .. }
                | CollageError::PlacementError { .. }
        )
    }
}
