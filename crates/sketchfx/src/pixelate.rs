//! Block resampling: the pixel-art pipeline.

use image::{imageops, imageops::FilterType, DynamicImage, RgbImage};

use crate::dither::floyd_steinberg;
use crate::error::StyleError;
use crate::quantize::{map_to_palette, quantize};

/// Parameters for [`pixelate`].
#[derive(Debug, Clone)]
pub struct PixelateOptions {
    /// Number of representative colors (clamped to [2, pixel count]).
    pub palette_size: u32,
    /// Edge length of the square blocks, in pixels. Must be at least 1.
    pub block_size: u32,
    /// Re-quantize the downsampled intermediate with error diffusion.
    pub dither: bool,
}

impl Default for PixelateOptions {
    fn default() -> Self {
        Self {
            palette_size: 8,
            block_size: 8,
            dither: false,
        }
    }
}

/// Turn an image into a palette-reduced, visibly blocked rendition.
///
/// The image is reduced to the quantized palette, downsampled to
/// `max(1, dim / block_size)` with nearest-neighbor sampling, optionally
/// dithered against the palette, and upsampled back to the original
/// dimensions (again nearest-neighbor) so every block is one flat color.
/// Output dimensions always equal input dimensions.
pub fn pixelate(image: &DynamicImage, options: &PixelateOptions) -> Result<RgbImage, StyleError> {
    if options.block_size == 0 {
        return Err(StyleError::InvalidBlockSize);
    }

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Ok(rgb);
    }

    let quantized = quantize(&rgb, options.palette_size);
    let mapped = map_to_palette(&quantized, width, height);

    let down_w = (width / options.block_size).max(1);
    let down_h = (height / options.block_size).max(1);
    let mut down = imageops::resize(&mapped, down_w, down_h, FilterType::Nearest);

    if options.dither {
        down = floyd_steinberg(&down, &quantized.palette);
    }

    Ok(imageops::resize(&down, width, height, FilterType::Nearest))
}
