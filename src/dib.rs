//! Device-independent bitmap encoding.
//!
//! Raster consumers read pixel rows bottom-up and expect every row to start
//! on a 4-byte (DWORD) boundary. Decoded images are top-down and unpadded.
//! [`encode_dib`] bridges the two:
//!
//! ```text
//! source (top-down, 6 bytes/row)      output (bottom-up, 8 bytes/row)
//! row 0: R0 R0 R0 R0 R0 R0            row 0: R1 R1 R1 R1 R1 R1 00 00
//! row 1: R1 R1 R1 R1 R1 R1            row 1: R0 R0 R0 R0 R0 R0 00 00
//! ```
//!
//! The width, height and bit depth are not embedded in the bytes. They travel
//! alongside in a [`Dib`], and [`BitmapInfoHeader`] turns them into the
//! 40-byte header a raster API takes next to the pixel data.

use log::debug;
use std::convert::TryFrom;

use crate::{error::Error, BITMAP_INFO_HEADER_SIZE, DWORD_ALIGNMENT};

/// Uncompressed RGB, the only compression this crate emits.
pub const BI_RGB: u32 = 0;

/// Unpadded byte length of one row of `width` pixels.
///
/// 1, 4, 8 and 24 bits per pixel round partial bytes up. Any other depth must
/// fill whole bytes exactly.
///
/// # Returns
/// The row length in bytes, or
/// * [`Error::UnsupportedBitDepth`] for a zero depth or a partial trailing byte
/// * [`Error::DimensionOverflow`] when the row length overflows `usize`. No
///   height is involved at this point, so its `height` field is always 0.
pub fn row_byte_size(bits_per_pixel: u16, width: usize) -> Result<usize, Error> {
    let overflow = || Error::DimensionOverflow { width, height: 0 };
    match bits_per_pixel {
        24 => width.checked_mul(3).ok_or_else(overflow),
        8 => Ok(width),
        1 => Ok(width / 8 + usize::from(width % 8 != 0)),
        4 => Ok(width / 2 + width % 2),
        0 => Err(Error::UnsupportedBitDepth {
            bits_per_pixel,
            width,
        }),
        _ => {
            let bits = width
                .checked_mul(usize::from(bits_per_pixel))
                .ok_or_else(overflow)?;
            if bits % 8 != 0 {
                debug!(
                    "{} bits per pixel leaves a partial byte in a {} pixel row",
                    bits_per_pixel, width
                );
                return Err(Error::UnsupportedBitDepth {
                    bits_per_pixel,
                    width,
                });
            }
            Ok(bits / 8)
        }
    }
}

/// Filler bytes needed after a row of `row_byte_size` bytes.
pub fn pad_bytes(row_byte_size: usize) -> usize {
    (DWORD_ALIGNMENT - row_byte_size % DWORD_ALIGNMENT) % DWORD_ALIGNMENT
}

/// Flip a top-down pixel buffer to bottom-up and pad every row to a DWORD.
///
/// Output row `k` holds source row `height - 1 - k`. Padding bytes are zero.
/// The input is never modified and bytes past `row_byte_size * height` are
/// ignored.
///
/// # Errors
/// * [`Error::UnsupportedBitDepth`] - see [`row_byte_size`]
/// * [`Error::MalformedBuffer`] - `src` holds fewer bytes than the dimensions need
/// * [`Error::DimensionOverflow`] - the output size does not fit in `usize`
pub fn encode_dib(
    src: &[u8],
    width: usize,
    height: usize,
    bits_per_pixel: u16,
) -> Result<Vec<u8>, Error> {
    let overflow = || Error::DimensionOverflow { width, height };

    let row = row_byte_size(bits_per_pixel, width).map_err(|err| match err {
        Error::DimensionOverflow { .. } => overflow(),
        other => other,
    })?;
    let expected = row.checked_mul(height).ok_or_else(overflow)?;
    if src.len() < expected {
        debug!(
            "source holds {} bytes, {}x{} at {} bpp needs {}",
            src.len(),
            width,
            height,
            bits_per_pixel,
            expected
        );
        return Err(Error::MalformedBuffer {
            expected,
            actual: src.len(),
        });
    }

    let stride = row.checked_add(pad_bytes(row)).ok_or_else(overflow)?;
    let total = stride.checked_mul(height).ok_or_else(overflow)?;
    debug!(
        "dib {}x{} {} bpp: row {} bytes, stride {}, total {}",
        width, height, bits_per_pixel, row, stride, total
    );

    let mut out = vec![0u8; total];
    if row == 0 {
        return Ok(out);
    }

    let rows = src[..expected].chunks_exact(row).rev();
    for (src_row, dst_row) in rows.zip(out.chunks_exact_mut(stride)) {
        dst_row[..row].copy_from_slice(src_row);
    }

    Ok(out)
}

/// Encoded bottom-up bitmap together with the scalars needed to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dib {
    data: Vec<u8>,
    width: usize,
    height: usize,
    bits_per_pixel: u16,
    row_byte_size: usize,
}

impl Dib {
    /// Encode a top-down, unpadded buffer. See [`encode_dib`].
    pub fn encode(
        src: &[u8],
        width: usize,
        height: usize,
        bits_per_pixel: u16,
    ) -> Result<Self, Error> {
        let data = encode_dib(src, width, height, bits_per_pixel)?;
        Ok(Dib {
            data,
            width,
            height,
            bits_per_pixel,
            row_byte_size: row_byte_size(bits_per_pixel, width)?,
        })
    }

    /// Bottom-up, padded pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take the pixel bytes, dropping the scalars.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels, equal to the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bit depth the rows were laid out for.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Pixel bytes per row, without padding.
    pub fn row_byte_size(&self) -> usize {
        self.row_byte_size
    }

    /// Bytes per row including padding.
    pub fn row_stride(&self) -> usize {
        self.row_byte_size + pad_bytes(self.row_byte_size)
    }

    /// Unpadded pixel bytes of output row `k`, counting from the bottom.
    pub fn row(&self, k: usize) -> Option<&[u8]> {
        if k >= self.height {
            return None;
        }
        let start = k * self.row_stride();
        self.data.get(start..start + self.row_byte_size)
    }

    /// Header describing this bitmap. See [`BitmapInfoHeader::for_dib`].
    pub fn info_header(&self) -> Result<BitmapInfoHeader, Error> {
        BitmapInfoHeader::for_dib(self)
    }
}

/// The `BITMAPINFOHEADER` structure describing an uncompressed [`Dib`].
///
/// A positive `height` marks the rows as bottom-up. Palette fields are left
/// at zero, so bit depths of 8 and below need a color table supplied by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapInfoHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub clr_used: u32,
    pub clr_important: u32,
}

impl BitmapInfoHeader {
    /// Populate the header fields from an encoded bitmap.
    ///
    /// # Arguments
    /// * `dib` - encoded bitmap the header will be passed alongside
    ///
    /// # Returns
    /// The header, or [`Error::DimensionOverflow`] when the width or height
    /// exceeds `i32::MAX` or the data length exceeds `u32::MAX`.
    pub fn for_dib(dib: &Dib) -> Result<Self, Error> {
        let overflow = || Error::DimensionOverflow {
            width: dib.width,
            height: dib.height,
        };
        Ok(BitmapInfoHeader {
            size: BITMAP_INFO_HEADER_SIZE as u32,
            width: i32::try_from(dib.width).map_err(|_| overflow())?,
            height: i32::try_from(dib.height).map_err(|_| overflow())?,
            planes: 1,
            bit_count: dib.bits_per_pixel,
            compression: BI_RGB,
            size_image: u32::try_from(dib.data.len()).map_err(|_| overflow())?,
            x_pels_per_meter: 0,
            y_pels_per_meter: 0,
            clr_used: 0,
            clr_important: 0,
        })
    }

    /// Little-endian wire layout.
    pub fn to_bytes(&self) -> [u8; BITMAP_INFO_HEADER_SIZE] {
        let mut buf = [0u8; BITMAP_INFO_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.size.to_le_bytes());
        buf[4..8].copy_from_slice(&self.width.to_le_bytes());
        buf[8..12].copy_from_slice(&self.height.to_le_bytes());
        buf[12..14].copy_from_slice(&self.planes.to_le_bytes());
        buf[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        buf[16..20].copy_from_slice(&self.compression.to_le_bytes());
        buf[20..24].copy_from_slice(&self.size_image.to_le_bytes());
        buf[24..28].copy_from_slice(&self.x_pels_per_meter.to_le_bytes());
        buf[28..32].copy_from_slice(&self.y_pels_per_meter.to_le_bytes());
        buf[32..36].copy_from_slice(&self.clr_used.to_le_bytes());
        buf[36..40].copy_from_slice(&self.clr_important.to_le_bytes());
        buf
    }
}
