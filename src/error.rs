//! Error types for bitmap conversion.
//!
//! This module defines all possible errors that can occur while addressing
//! pixels in an [`ImageBuffer`](crate::ImageBuffer) or encoding a pixel
//! buffer into a device-independent bitmap.

use thiserror::Error;

/// Main error type for bitmap conversion operations.
///
/// Every variant is a local, recoverable condition. The caller decides
/// whether to log, skip the image, or abort the print job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinate lies outside the buffer bounds.
    ///
    /// Only the strict accessors report this. The lenient `get`/`set`
    /// pair silently ignores out-of-range coordinates instead.
    #[error("Pixel ({x}, {y}) is outside the image bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// Bit depth cannot be laid out as whole bytes per row.
    ///
    /// Raised for a zero bit depth, or for a depth outside 1/4/8/24 whose
    /// `width * bits_per_pixel` is not a multiple of 8.
    #[error("Unsupported bit depth {bits_per_pixel} for a row of {width} pixels")]
    UnsupportedBitDepth { bits_per_pixel: u16, width: usize },

    /// Source buffer is too short for the declared dimensions.
    ///
    /// Checked before any row is copied, so no partial output is produced.
    #[error("Malformed buffer: expected at least {expected} bytes, found {actual}")]
    MalformedBuffer { expected: usize, actual: usize },

    /// Output size does not fit in `usize`.
    ///
    /// `height` is 0 when only the row length of `width` pixels overflowed.
    #[error("Bitmap of {width}x{height} pixels does not fit in memory")]
    DimensionOverflow { width: usize, height: usize },
}
