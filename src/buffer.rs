//! Packed BGR pixel storage.
//!
//! [`ImageBuffer`] holds one contiguous, unpadded, top-down row-major byte
//! buffer with three bytes per pixel. Pixel access is lenient: writes outside
//! the bounds are dropped and reads outside the bounds return the zero color,
//! so drawing code can compose partially overlapping regions without its own
//! bounds checks. [`ImageBuffer::try_get`] and [`ImageBuffer::try_set`] report
//! the same condition as [`Error::OutOfBounds`] instead.

use image::{DynamicImage, GenericImageView, Pixel};
use log::trace;
use std::ops::Deref;

use crate::{
    color::{convert, PackedColor, SourceColor},
    dib::Dib,
    error::Error,
    geometry::Rect,
    BYTES_PER_PIXEL,
};

/// A decoded image that can be copied into an [`ImageBuffer`].
pub trait SourceImage {
    fn bounds(&self) -> Rect;

    /// Color at `(x, y)`, or [`SourceColor::TRANSPARENT`] outside
    /// [`bounds`](Self::bounds).
    fn color_at(&self, x: i32, y: i32) -> SourceColor;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pixels: Vec<u8>,
    stride: usize,
    bounds: Rect,
}

impl ImageBuffer {
    /// Allocate a zero-filled buffer covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        let stride = BYTES_PER_PIXEL * bounds.width();
        ImageBuffer {
            pixels: vec![0u8; stride * bounds.height()],
            stride,
            bounds,
        }
    }

    /// Allocate a buffer sized to `src` and copy every pixel of it.
    pub fn from_image<S: SourceImage + ?Sized>(src: &S) -> Self {
        let mut buf = Self::new(src.bounds());
        buf.draw(src);
        buf
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// Bytes per row. Rows carry no padding at this stage.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw top-down B,G,R bytes, `stride * height` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Byte offset of `(x, y)`. The point must already be inside the bounds.
    pub(crate) fn pixel_offset(&self, x: i32, y: i32) -> usize {
        (y - self.bounds.min_y) as usize * self.stride
            + (x - self.bounds.min_x) as usize * BYTES_PER_PIXEL
    }

    /// Color at `(x, y)`, or the zero color outside the bounds.
    pub fn get(&self, x: i32, y: i32) -> PackedColor {
        if !self.bounds.contains(x, y) {
            return PackedColor::default();
        }
        let i = self.pixel_offset(x, y);
        PackedColor {
            blue: self.pixels[i],
            green: self.pixels[i + 1],
            red: self.pixels[i + 2],
        }
    }

    /// Convert `color` and store it at `(x, y)`. Does nothing outside the bounds.
    pub fn set<C: Into<SourceColor>>(&mut self, x: i32, y: i32, color: C) {
        if !self.bounds.contains(x, y) {
            return;
        }
        let i = self.pixel_offset(x, y);
        let c = convert(color.into());
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&c.to_bgr_bytes());
    }

    /// Color at `(x, y)`.
    ///
    /// # Returns
    /// The stored color, or [`Error::OutOfBounds`] when `(x, y)` lies outside
    /// the buffer.
    pub fn try_get(&self, x: i32, y: i32) -> Result<PackedColor, Error> {
        if !self.bounds.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(self.get(x, y))
    }

    /// Convert `color` and store it at `(x, y)`.
    ///
    /// # Returns
    /// [`Error::OutOfBounds`] when `(x, y)` lies outside the buffer, in which
    /// case nothing is written.
    pub fn try_set<C: Into<SourceColor>>(
        &mut self,
        x: i32,
        y: i32,
        color: C,
    ) -> Result<(), Error> {
        if !self.bounds.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        self.set(x, y, color);
        Ok(())
    }

    /// Copy every pixel of `src` that falls inside both bounds rectangles.
    ///
    /// Pixels are replaced, not blended.
    pub fn draw<S: SourceImage + ?Sized>(&mut self, src: &S) {
        let r = self.bounds.intersect(&src.bounds());
        trace!("draw region {:?} into {:?}", r, self.bounds);
        for y in r.min_y..r.max_y {
            for x in r.min_x..r.max_x {
                self.set(x, y, src.color_at(x, y));
            }
        }
    }

    /// Encode the buffer as a 24 bits per pixel bottom-up DIB.
    ///
    /// Fails only with [`Error::DimensionOverflow`], since the buffer always
    /// holds exactly `stride * height` bytes.
    pub fn to_dib(&self) -> Result<Dib, Error> {
        Dib::encode(&self.pixels, self.width(), self.height(), 24)
    }
}

impl SourceImage for ImageBuffer {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn color_at(&self, x: i32, y: i32) -> SourceColor {
        self.get(x, y).into()
    }
}

impl<P, C> SourceImage for image::ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn bounds(&self) -> Rect {
        let (w, h) = self.dimensions();
        Rect::from_size(w, h)
    }

    fn color_at(&self, x: i32, y: i32) -> SourceColor {
        if !SourceImage::bounds(self).contains(x, y) {
            return SourceColor::TRANSPARENT;
        }
        self.get_pixel(x as u32, y as u32).to_rgba().into()
    }
}

impl SourceImage for DynamicImage {
    fn bounds(&self) -> Rect {
        let (w, h) = self.dimensions();
        Rect::from_size(w, h)
    }

    fn color_at(&self, x: i32, y: i32) -> SourceColor {
        if !SourceImage::bounds(self).contains(x, y) {
            return SourceColor::TRANSPARENT;
        }
        let (x, y) = (x as u32, y as u32);
        match self {
            DynamicImage::ImageLuma16(img) => img.get_pixel(x, y).to_rgba().into(),
            DynamicImage::ImageLumaA16(img) => img.get_pixel(x, y).to_rgba().into(),
            DynamicImage::ImageRgb16(img) => img.get_pixel(x, y).to_rgba().into(),
            DynamicImage::ImageRgba16(img) => (*img.get_pixel(x, y)).into(),
            _ => self.get_pixel(x, y).into(),
        }
    }
}
