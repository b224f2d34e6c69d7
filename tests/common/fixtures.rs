//! Image fixtures for integration tests, generated in memory.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};

fn to_png(image: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode fixture PNG");
    buf
}

/// Square sketch: left half black ink, right half white ground.
pub fn half_ink_sketch_png(size: u32) -> Vec<u8> {
    let gray = GrayImage::from_fn(size, size, |x, _| {
        if x < size / 2 {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    to_png(DynamicImage::ImageLuma8(gray))
}

/// Square image with a red/blue checkerboard, many distinct shades.
pub fn colorful_png(size: u32) -> Vec<u8> {
    let rgb = RgbImage::from_fn(size, size, |x, y| {
        Rgb([
            ((x * 255) / size.max(1)) as u8,
            ((y * 255) / size.max(1)) as u8,
            (((x + y) * 127) / size.max(1)) as u8,
        ])
    });
    to_png(DynamicImage::ImageRgb8(rgb))
}

/// Bytes that are not any raster format.
pub fn not_an_image() -> Vec<u8> {
    b"this is definitely not image data".to_vec()
}
