use alloc::string::String;
use enough::StopReason;

use crate::pixel::PixelFormat;

/// Errors from bitmap parsing, conversion and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FsBmpError {
    #[error("not a valid bitmap: {0}")]
    BadSignature(String),

    #[error("unsupported bitmap header: {0}")]
    UnsupportedHeader(String),

    #[error("width and height must match: {width}x{height}")]
    DimensionMismatch { width: u32, height: u32 },

    #[error("dimensions must be a power of two and at least 4: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Flight Simulator header is incompatible or corrupt: {0}")]
    IncompatibleExtension(String),

    #[error("truncated pixel data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("unsupported output format: {}", .0.description())]
    UnsupportedTarget(PixelFormat),

    #[error("unsupported pixel format: {}", .0.description())]
    UnsupportedFormat(PixelFormat),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for FsBmpError {
    fn from(r: StopReason) -> Self {
        FsBmpError::Cancelled(r)
    }
}
