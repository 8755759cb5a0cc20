//! Error types for scribble-canvas2d.

use thiserror::Error;

/// Result type alias using SurfaceError.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors that can occur while creating, drawing on, or serializing a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Invalid surface dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngError(String),

    /// PNG decoding error.
    #[error("PNG decoding error: {0}")]
    PngDecodeError(String),
}

impl From<png::EncodingError> for SurfaceError {
    fn from(err: png::EncodingError) -> Self {
        SurfaceError::PngError(err.to_string())
    }
}

impl From<png::DecodingError> for SurfaceError {
    fn from(err: png::DecodingError) -> Self {
        SurfaceError::PngDecodeError(err.to_string())
    }
}
