//! Planar luma/chroma images, as produced by baseline JPEG decoders.

use crate::{buffer::SourceImage, color::SourceColor, geometry::Rect};

/// How chroma planes are subsampled relative to the luma plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsampleRatio {
    /// Full resolution chroma.
    Ratio444,
    /// Half horizontal resolution.
    Ratio422,
    /// Half horizontal and half vertical resolution.
    Ratio420,
    /// Half vertical resolution.
    Ratio440,
}

impl SubsampleRatio {
    fn halves_x(self) -> bool {
        matches!(self, Self::Ratio422 | Self::Ratio420)
    }

    fn halves_y(self) -> bool {
        matches!(self, Self::Ratio420 | Self::Ratio440)
    }
}

/// Planar YCbCr image.
///
/// `y` holds one sample per pixel. `cb` and `cr` hold one sample per chroma
/// block, whose size depends on the [`SubsampleRatio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YCbCrImage {
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub y_stride: usize,
    pub c_stride: usize,
    pub ratio: SubsampleRatio,
    pub rect: Rect,
}

impl YCbCrImage {
    /// Allocate zeroed planes covering `rect`.
    pub fn new(rect: Rect, ratio: SubsampleRatio) -> Self {
        let (w, h) = (rect.width(), rect.height());
        let cw = if ratio.halves_x() {
            half_span(rect.min_x, rect.max_x)
        } else {
            w
        };
        let ch = if ratio.halves_y() {
            half_span(rect.min_y, rect.max_y)
        } else {
            h
        };
        YCbCrImage {
            y: vec![0u8; w * h],
            cb: vec![0u8; cw * ch],
            cr: vec![0u8; cw * ch],
            y_stride: w,
            c_stride: cw,
            ratio,
            rect,
        }
    }

    /// Index into the luma plane. The point must already be inside the bounds.
    pub fn y_offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min_y) as usize * self.y_stride + (x - self.rect.min_x) as usize
    }

    /// Index into the chroma planes for the pixel at `(x, y)`, which must be
    /// inside the bounds.
    pub fn c_offset(&self, x: i32, y: i32) -> usize {
        let cx = if self.ratio.halves_x() {
            x.div_euclid(2) - self.rect.min_x.div_euclid(2)
        } else {
            x - self.rect.min_x
        };
        let cy = if self.ratio.halves_y() {
            y.div_euclid(2) - self.rect.min_y.div_euclid(2)
        } else {
            y - self.rect.min_y
        };
        cy as usize * self.c_stride + cx as usize
    }

    /// Luma and chroma samples at `(x, y)`, or `None` outside the bounds.
    pub fn ycbcr_at(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        if !self.rect.contains(x, y) {
            return None;
        }
        let yi = self.y_offset(x, y);
        let ci = self.c_offset(x, y);
        Some((self.y[yi], self.cb[ci], self.cr[ci]))
    }
}

// Number of chroma samples covering [min, max) when two pixels share one.
fn half_span(min: i32, max: i32) -> usize {
    if min >= max {
        return 0;
    }
    ((i64::from(max) + 1).div_euclid(2) - i64::from(min).div_euclid(2)) as usize
}

impl SourceImage for YCbCrImage {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn color_at(&self, x: i32, y: i32) -> SourceColor {
        match self.ycbcr_at(x, y) {
            Some((y, cb, cr)) => SourceColor::YCbCr { y, cb, cr },
            None => SourceColor::TRANSPARENT,
        }
    }
}
