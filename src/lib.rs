//! DIB raster conversion
//!
//! This crate converts decoded images into the bottom-up, DWORD-aligned,
//! Blue-Green-Red byte layout that raster output devices (printers, display
//! surfaces) take as a device-independent bitmap.
//!
//! The pipeline has three steps: copy the decoded image into an
//! [`ImageBuffer`], encode its bytes with [`encode_dib`] (or [`Dib::encode`]),
//! and hand the result plus its [`BitmapInfoHeader`] to the drawing call.
//!
//! # Example
//!
//! ```rust
//! use dib_raster::{ImageBuffer, PackedColor};
//! use image::{Rgb, RgbImage};
//!
//! let decoded = RgbImage::from_pixel(3, 2, Rgb([255, 0, 0]));
//! let buffer = ImageBuffer::from_image(&decoded);
//! assert_eq!(buffer.get(0, 0), PackedColor::new(255, 0, 0));
//!
//! let dib = buffer.to_dib().unwrap();
//! assert_eq!(dib.row_stride(), 12);
//! assert_eq!(dib.info_header().unwrap().to_bytes().len(), 40);
//! ```

mod buffer;
mod color;
mod dib;
mod error;
mod geometry;
mod ycbcr;

pub use crate::{
    buffer::{ImageBuffer, SourceImage},
    color::{convert, ycbcr_to_rgb, PackedColor, SourceColor},
    dib::{encode_dib, pad_bytes, row_byte_size, BitmapInfoHeader, Dib, BI_RGB},
    error::Error,
    geometry::Rect,
    ycbcr::{SubsampleRatio, YCbCrImage},
};

/// Bytes used by one pixel in an [`ImageBuffer`].
///
/// Pixels are stored as Blue, Green, Red with no alpha and no padding, so a
/// buffer row is always `3 * width` bytes long.
pub const BYTES_PER_PIXEL: usize = 3;

/// Row alignment required by the DIB format.
///
/// Every encoded row is padded with zero bytes up to a multiple of this value.
pub const DWORD_ALIGNMENT: usize = 4;

/// Size in bytes of a serialized [`BitmapInfoHeader`].
pub const BITMAP_INFO_HEADER_SIZE: usize = 40;
