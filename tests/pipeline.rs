//! # Pipeline Tests
//!
//! Drive a decoded image through the whole conversion: copy into an
//! `ImageBuffer`, encode as a bottom-up DIB and build its info header.

use dib_raster::{
    encode_dib, Dib, Error, ImageBuffer, PackedColor, Rect, SourceColor, SubsampleRatio,
    YCbCrImage,
};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_rgb_image_to_dib() {
    init_logger();

    let decoded = RgbImage::from_fn(2, 2, |x, y| {
        let base = (y * 2 + x) as u8 * 30;
        Rgb([base + 30, base + 20, base + 10])
    });
    let buffer = ImageBuffer::from_image(&decoded);

    // Top-down BGR rows exactly as in the 2x2 reference scenario.
    assert_eq!(
        buffer.pixels(),
        &[10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120]
    );

    let dib = buffer.to_dib().unwrap();
    assert_eq!(
        dib.data(),
        &[70, 80, 90, 100, 110, 120, 0, 0, 10, 20, 30, 40, 50, 60, 0, 0]
    );
    assert_eq!(dib.width(), 2);
    assert_eq!(dib.height(), 2);
    assert_eq!(dib.bits_per_pixel(), 24);
}

#[test]
fn test_odd_width_rows_are_padded() {
    init_logger();

    let decoded = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8, y as u8, 0xEE]));
    let buffer = ImageBuffer::from_image(&decoded);
    let dib = buffer.to_dib().unwrap();

    assert_eq!(dib.row_byte_size(), 15);
    assert_eq!(dib.row_stride(), 16);
    assert_eq!(dib.data().len(), 48);
    for k in 0..3 {
        let stride = dib.row_stride();
        assert_eq!(dib.data()[k * stride + 15], 0);
        let src_y = 2 - k;
        let expected = &buffer.pixels()[src_y * 15..(src_y + 1) * 15];
        assert_eq!(dib.row(k).unwrap(), expected);
    }
}

#[test]
fn test_ycbcr_source_uses_luma_chroma_path() {
    init_logger();

    let mut decoded = YCbCrImage::new(Rect::new(0, 0, 2, 2), SubsampleRatio::Ratio420);
    decoded.y.copy_from_slice(&[0, 128, 255, 76]);
    decoded.cb[0] = 128;
    decoded.cr[0] = 128;

    let buffer = ImageBuffer::from_image(&decoded);
    assert_eq!(buffer.get(0, 0), PackedColor::new(0, 0, 0));
    assert_eq!(buffer.get(1, 0), PackedColor::new(128, 128, 128));
    assert_eq!(buffer.get(0, 1), PackedColor::new(255, 255, 255));
    assert_eq!(buffer.get(1, 1), PackedColor::new(76, 76, 76));
}

#[test]
fn test_dynamic_rgba_drops_alpha_after_premultiply() {
    init_logger();

    let mut decoded = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 255]));
    decoded.put_pixel(1, 0, Rgba([200, 100, 50, 0]));
    let buffer = ImageBuffer::from_image(&DynamicImage::ImageRgba8(decoded));

    assert_eq!(buffer.get(0, 0), PackedColor::new(200, 100, 50));
    assert_eq!(buffer.get(1, 0), PackedColor::default());
}

#[test]
fn test_offset_bounds_compose() {
    init_logger();

    let decoded = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
    let mut buffer = ImageBuffer::new(Rect::new(2, 2, 6, 6));
    buffer.draw(&decoded);

    assert_eq!(buffer.get(2, 2), PackedColor::new(1, 2, 3));
    assert_eq!(buffer.get(3, 3), PackedColor::new(1, 2, 3));
    assert_eq!(buffer.get(4, 4), PackedColor::default());
    assert_eq!(buffer.get(0, 0), PackedColor::default());

    let white = SourceColor::YCbCr {
        y: 255,
        cb: 128,
        cr: 128,
    };
    buffer.set(5, 5, white);
    let dib = buffer.to_dib().unwrap();
    // Bottom-up: the last image row comes first.
    assert_eq!(&dib.row(0).unwrap()[9..12], &[255, 255, 255]);
    assert_eq!(&dib.row(3).unwrap()[0..3], &[3, 2, 1]);
}

#[test]
fn test_header_matches_encoded_buffer() {
    init_logger();

    let dib = Dib::encode(&[0xFFu8; 6], 3, 2, 8).unwrap();
    let header = dib.info_header().unwrap();
    assert_eq!(dib.row_stride(), 4);
    assert_eq!(header.size_image as usize, dib.data().len());
    assert_eq!(header.bit_count, 8);
    assert_eq!(header.height, 2);
}

#[test]
fn test_rejected_inputs() {
    init_logger();

    assert_eq!(
        encode_dib(&[0u8; 5], 2, 1, 24),
        Err(Error::MalformedBuffer {
            expected: 6,
            actual: 5
        })
    );
    assert_eq!(
        Dib::encode(&[0u8; 16], 5, 2, 3),
        Err(Error::UnsupportedBitDepth {
            bits_per_pixel: 3,
            width: 5
        })
    );
}
