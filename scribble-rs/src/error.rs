use scribble_canvas2d::SurfaceError;
use thiserror::Error;

pub type RasterResult<T> = Result<T, RasterError>;

/// Errors raised by the pixel-processing core.
///
/// Absent inputs and degenerate geometry are not errors; they resolve to
/// documented no-ops or fallbacks at the call site.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Area {x},{y} {width}x{height} does not fit a {surface_width}x{surface_height} surface")]
    InvalidArea {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        surface_width: u32,
        surface_height: u32,
    },

    #[error("Cannot resolve color `{0}`")]
    Color(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Failed to deliver download: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid export configuration: {0}")]
    Config(String),

    #[error("GIF export cancelled")]
    Cancelled,

    #[error("GIF export timed out after {0} ms")]
    TimedOut(u64),

    #[error("GIF encoder is unavailable: {0}")]
    EncoderUnavailable(String),
}

impl From<image::ImageError> for RasterError {
    fn from(err: image::ImageError) -> Self {
        RasterError::Encode(err.to_string())
    }
}

impl From<serde_json::Error> for RasterError {
    fn from(err: serde_json::Error) -> Self {
        RasterError::Config(err.to_string())
    }
}
