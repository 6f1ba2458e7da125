//! Error types for pad configuration.

use thiserror::Error;

/// Errors raised at the configuration edges of the pad.
///
/// Touch handling and compositing never fail; only style, bounds and
/// config-file input can be rejected.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("Stroke width must be a positive number of pixels, got {0}")]
    InvalidStrokeWidth(u32),
    #[error("Pad bounds must have a non-zero area, got {width}x{height}")]
    EmptyBounds { width: f64, height: f64 },
    #[error("Pad bounds {width}x{height} exceed the {max} pixel limit per side")]
    BoundsTooLarge { width: f64, height: f64, max: f64 },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Signature pad is no longer running")]
    Disconnected,
}

/// Result type for pad operations.
pub type SignatureResult<T> = Result<T, SignatureError>;
