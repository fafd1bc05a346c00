//! Pixel color model.
//!
//! Raster consumers expect three bytes per pixel in Blue, Green, Red order.
//! [`PackedColor`] is that layout. Source pixels arrive as a [`SourceColor`],
//! either a 16-bit-per-channel alpha-premultiplied RGBA quad or a luma/chroma
//! triple, and [`convert`] reduces both to a `PackedColor`.

use image::{Luma, Rgb, Rgba};

/// Three 8-bit channels stored in B, G, R order.
///
/// Field order is the in-memory order written to the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct PackedColor {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl PackedColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        PackedColor { blue, green, red }
    }

    /// Read a color from three bytes laid out as B, G, R.
    pub fn from_bgr_bytes(bytes: [u8; 3]) -> Self {
        PackedColor {
            blue: bytes[0],
            green: bytes[1],
            red: bytes[2],
        }
    }

    pub fn to_bgr_bytes(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    /// Expand to the 16-bit-per-channel quad used by [`SourceColor::Rgba16`].
    ///
    /// Each byte is replicated into both halves of the 16-bit value and alpha
    /// is fully opaque.
    pub fn to_raw_channels(self) -> (u16, u16, u16, u16) {
        (
            expand_channel(self.red),
            expand_channel(self.green),
            expand_channel(self.blue),
            0xFFFF,
        )
    }
}

#[inline]
fn expand_channel(v: u8) -> u16 {
    let v = u16::from(v);
    v | (v << 8)
}

/// Every color representation the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceColor {
    /// Alpha-premultiplied channels in the 0..=0xFFFF range.
    Rgba16 { r: u16, g: u16, b: u16, a: u16 },
    /// Full-range JPEG style luma, blue-difference and red-difference chroma.
    YCbCr { y: u8, cb: u8, cr: u8 },
}

impl SourceColor {
    /// Fully transparent black, returned for reads outside an image.
    pub const TRANSPARENT: SourceColor = SourceColor::Rgba16 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Premultiply a straight (non-premultiplied) 8-bit RGBA value.
    pub fn from_straight_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let alpha = u32::from(a);
        let premul = |c: u8| ((u32::from(expand_channel(c)) * alpha) / 0xFF) as u16;
        SourceColor::Rgba16 {
            r: premul(r),
            g: premul(g),
            b: premul(b),
            a: expand_channel(a),
        }
    }

    /// Premultiply a straight (non-premultiplied) 16-bit RGBA value.
    pub fn from_straight_rgba16(r: u16, g: u16, b: u16, a: u16) -> Self {
        let alpha = u32::from(a);
        let premul = |c: u16| ((u32::from(c) * alpha) / 0xFFFF) as u16;
        SourceColor::Rgba16 {
            r: premul(r),
            g: premul(g),
            b: premul(b),
            a,
        }
    }
}

/// Reduce any source color to a [`PackedColor`].
///
/// Luma/chroma values go through [`ycbcr_to_rgb`]. RGBA quads keep the high
/// byte of every channel. Alpha is dropped.
pub fn convert(color: SourceColor) -> PackedColor {
    match color {
        SourceColor::YCbCr { y, cb, cr } => {
            let (red, green, blue) = ycbcr_to_rgb(y, cb, cr);
            PackedColor { blue, green, red }
        }
        SourceColor::Rgba16 { r, g, b, .. } => PackedColor {
            blue: (b >> 8) as u8,
            green: (g >> 8) as u8,
            red: (r >> 8) as u8,
        },
    }
}

/// Integer full-range YCbCr to RGB transform.
///
/// Uses 16.16 fixed point:
///
/// ```text
/// R = Y + 1.40200 * (Cr - 128)
/// G = Y - 0.34414 * (Cb - 128) - 0.71414 * (Cr - 128)
/// B = Y + 1.77200 * (Cb - 128)
/// ```
///
/// Luma is scaled by `0x10101` rather than `0x10000` so that the result
/// rounds to nearest after the final shift.
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let yy = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let r = yy + 91881 * cr;
    let g = yy - 22554 * cb - 46802 * cr;
    let b = yy + 116130 * cb;

    (clamp_fixed(r), clamp_fixed(g), clamp_fixed(b))
}

#[inline]
fn clamp_fixed(v: i32) -> u8 {
    if (v as u32) & 0xFF00_0000 == 0 {
        (v >> 16) as u8
    } else if v < 0 {
        0
    } else {
        0xFF
    }
}

impl From<SourceColor> for PackedColor {
    fn from(color: SourceColor) -> Self {
        convert(color)
    }
}

impl From<PackedColor> for SourceColor {
    fn from(c: PackedColor) -> Self {
        let (r, g, b, a) = c.to_raw_channels();
        SourceColor::Rgba16 { r, g, b, a }
    }
}

impl From<Rgb<u8>> for SourceColor {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        SourceColor::from_straight_rgba8(r, g, b, 0xFF)
    }
}

impl From<Rgba<u8>> for SourceColor {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        SourceColor::from_straight_rgba8(r, g, b, a)
    }
}

impl From<Rgba<u16>> for SourceColor {
    fn from(px: Rgba<u16>) -> Self {
        let [r, g, b, a] = px.0;
        SourceColor::from_straight_rgba16(r, g, b, a)
    }
}

impl From<Luma<u8>> for SourceColor {
    fn from(px: Luma<u8>) -> Self {
        let [l] = px.0;
        SourceColor::from_straight_rgba8(l, l, l, 0xFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_channels_replicate_bytes() {
        let c = PackedColor::new(0x12, 0xAB, 0xFF);
        assert_eq!(c.to_raw_channels(), (0x1212, 0xABAB, 0xFFFF, 0xFFFF));
        assert_eq!(
            PackedColor::default().to_raw_channels(),
            (0, 0, 0, 0xFFFF)
        );
    }

    #[test]
    fn test_field_order_is_bgr() {
        let c = PackedColor::new(1, 2, 3);
        assert_eq!(c.to_bgr_bytes(), [3, 2, 1]);
        assert_eq!(PackedColor::from_bgr_bytes([3, 2, 1]), c);
    }

    #[test]
    fn test_convert_rgba16_truncates_low_byte() {
        let c = convert(SourceColor::Rgba16 {
            r: 0x12FF,
            g: 0x3400,
            b: 0xFF80,
            a: 0xFFFF,
        });
        assert_eq!(c, PackedColor::new(0x12, 0x34, 0xFF));
    }

    #[test]
    fn test_packed_round_trip_through_rgba16() {
        for v in [0u8, 1, 0x7F, 0x80, 0xFE, 0xFF].iter().copied() {
            let c = PackedColor::new(v, v.wrapping_add(17), v.wrapping_mul(3));
            assert_eq!(convert(SourceColor::from(c)), c);
        }
    }

    #[test]
    fn test_ycbcr_gray_axis() {
        assert_eq!(ycbcr_to_rgb(0, 128, 128), (0, 0, 0));
        assert_eq!(ycbcr_to_rgb(128, 128, 128), (128, 128, 128));
        assert_eq!(ycbcr_to_rgb(255, 128, 128), (255, 255, 255));
    }

    #[test]
    fn test_ycbcr_saturated_red() {
        // (76, 85, 255) is the forward transform of pure red.
        assert_eq!(ycbcr_to_rgb(76, 85, 255), (254, 0, 0));
    }

    #[test]
    fn test_ycbcr_clamps() {
        assert_eq!(ycbcr_to_rgb(255, 255, 255).0, 255);
        assert_eq!(ycbcr_to_rgb(0, 0, 0).0, 0);
        assert_eq!(ycbcr_to_rgb(0, 255, 128).2, 225);
    }

    #[test]
    fn test_convert_ycbcr_stores_bgr() {
        let c = convert(SourceColor::YCbCr {
            y: 76,
            cb: 85,
            cr: 255,
        });
        assert_eq!(
            c,
            PackedColor {
                blue: 0,
                green: 0,
                red: 254
            }
        );
    }

    #[test]
    fn test_image_pixels() {
        assert_eq!(
            convert(Rgb([10u8, 20, 30]).into()),
            PackedColor::new(10, 20, 30)
        );
        assert_eq!(convert(Luma([77u8]).into()), PackedColor::new(77, 77, 77));
        assert_eq!(
            convert(Rgba([200u16 << 8, 0, 0xFFFF, 0xFFFF]).into()),
            PackedColor::new(200, 0, 255)
        );
    }

    #[test]
    fn test_straight_alpha_is_premultiplied() {
        let transparent: SourceColor = Rgba([255u8, 255, 255, 0]).into();
        assert_eq!(convert(transparent), PackedColor::default());

        let half = SourceColor::from_straight_rgba8(255, 0, 0, 0x80);
        assert_eq!(
            half,
            SourceColor::Rgba16 {
                r: 0x8080,
                g: 0,
                b: 0,
                a: 0x8080
            }
        );
        assert_eq!(convert(half), PackedColor::new(0x80, 0, 0));
    }
}
