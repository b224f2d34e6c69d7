//! Layer compositing: the flat-color icon pipeline.
//!
//! A sketch becomes an icon in three mask steps and up to three layers:
//! binarize, smooth, one dilation pass to settle the ink mask, then base
//! (background or transparent), optional stroke band, and foreground are
//! stacked with source-over alpha compositing. All layer math is mask
//! algebra from [`crate::mask`]; there are no per-pixel neighborhood loops
//! here.

use image::{DynamicImage, Rgba, RgbaImage};

use crate::color::ColorSpec;
use crate::mask::{self, Mask};

/// Gaussian sigma used to knock the aliasing out of the binarized edge.
const EDGE_SIGMA: f32 = 1.2;

/// Parameters for [`compose_icon`].
#[derive(Debug, Clone)]
pub struct IconOptions {
    /// Fill color for ink regions.
    pub foreground: Rgba<u8>,
    /// Base layer fill, or transparent.
    pub background: ColorSpec,
    /// Fill color for the outline band (only used when `stroke_px > 0`).
    pub stroke_color: Rgba<u8>,
    /// Luma cut separating ink from background. Nominal range 0-255;
    /// out-of-range values produce a degenerate mask, not an error.
    pub threshold: i32,
    /// Outline width in pixels; 0 disables the stroke layer.
    pub stroke_px: u32,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            foreground: Rgba([0x11, 0x11, 0x11, 0xFF]),
            background: ColorSpec::Transparent,
            stroke_color: Rgba([0x00, 0x00, 0x00, 0xFF]),
            threshold: 200,
            stroke_px: 0,
        }
    }
}

/// Render a sketch as a flat-colored RGBA icon.
///
/// Assumes dark lines on a light ground. The output always has the same
/// dimensions as the input and is always RGBA, whatever the input mode.
pub fn compose_icon(image: &DynamicImage, options: &IconOptions) -> RgbaImage {
    let mask = mask::binarize(image, options.threshold);
    let mask = mask::smooth_edges(&mask, EDGE_SIGMA);
    let mask = mask::thicken(&mask, 1);

    let (width, height) = mask.dimensions();

    let mut base = match options.background {
        ColorSpec::Solid(color) => RgbaImage::from_pixel(width, height, color),
        ColorSpec::Transparent => RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
    };

    if options.stroke_px > 0 {
        let band = mask::stroke_from_mask(&mask, options.stroke_px as i32);
        composite_over(&mut base, &fill_masked(options.stroke_color, &band));
    }

    composite_over(&mut base, &fill_masked(options.foreground, &mask));
    base
}

/// Solid fill whose alpha channel is scaled by a mask (ink is opaque,
/// background fully transparent).
fn fill_masked(color: Rgba<u8>, mask: &Mask) -> RgbaImage {
    let (width, height) = mask.dimensions();
    let data = mask
        .as_raw()
        .iter()
        .flat_map(|&m| {
            let alpha = (u16::from(color[3]) * u16::from(m) / 255) as u8;
            [color[0], color[1], color[2], alpha]
        })
        .collect();
    RgbaImage::from_raw(width, height, data).expect("buffer length matches dimensions")
}

/// Standard source-over compositing of straight-alpha RGBA, top onto base.
fn composite_over(base: &mut RgbaImage, top: &RgbaImage) {
    for (dst, src) in base.pixels_mut().zip(top.pixels()) {
        let sa = f32::from(src[3]) / 255.0;
        if sa <= 0.0 {
            continue;
        }
        let da = f32::from(dst[3]) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let blended = (f32::from(src[c]) * sa + f32::from(dst[c]) * da * (1.0 - sa)) / out_a;
            dst[c] = blended.round() as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }
}
