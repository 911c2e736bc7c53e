//! Result and error types for the comparison engine.

use thiserror::Error;

/// Result type for engine operations
pub type ImgCompareResult<T> = Result<T, ImgCompareError>;

/// Errors that can occur while comparing or compositing images
#[derive(Debug, Error)]
pub enum ImgCompareError {
    /// Pixel data length does not match the declared dimensions
    #[error("Invalid buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer {
        /// Byte count implied by width x height x 4
        expected: usize,
        /// Byte count actually supplied
        actual: usize,
    },

    /// Width or height is not positive, or the byte size overflows
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Declared width
        width: i64,
        /// Declared height
        height: i64,
    },

    /// Blend factor outside [0, 1]
    #[error("Invalid alpha: {alpha} is outside [0, 1]")]
    InvalidAlpha {
        /// Offending blend factor
        alpha: f64,
    },

    /// Two buffers that must share a canvas do not
    #[error("Dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        /// Width of the first buffer
        left_width: u32,
        /// Height of the first buffer
        left_height: u32,
        /// Width of the second buffer
        right_width: u32,
        /// Height of the second buffer
        right_height: u32,
    },

    /// The resizer rejected a buffer or failed mid-resize
    #[error("Resampling failed: {message}")]
    Resample {
        /// Error message
        message: String,
    },

    /// PNG encoding failed
    #[error("Encoding failed: {message}")]
    Encode {
        /// Error message
        message: String,
    },

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImgCompareError {
    /// Create a resampling error
    #[must_use]
    pub fn resample(message: impl Into<String>) -> Self {
        Self::Resample {
            message: message.into(),
        }
    }

    /// Create an encoding error
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}
