//! Single-pass color quantization.
//!
//! A deliberately coarse k-means approximation: one assignment step and one
//! center update, no Lloyd iteration to convergence. Quality is close enough
//! for pixel-art palettes and the cost stays linear in the pixel count. The
//! RNG that picks the initial centers is seeded with a fixed constant, so
//! the same input and palette size always produce the same palette and the
//! same label assignment.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixed seed for center sampling. Quantization must be reproducible so
/// outputs are testable and cacheable.
const SAMPLE_SEED: u64 = 42;

/// Result of a quantization pass: one palette index per source pixel, in
/// row-major order, and the palette itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantized {
    /// Palette index for each source pixel.
    pub labels: Vec<u32>,
    /// Representative colors, at most `palette_size` entries.
    pub palette: Vec<Rgb<u8>>,
}

/// Reduce an image to at most `palette_size` representative colors.
///
/// `palette_size` is clamped to at least 2 and at most the pixel count.
/// Initial centers are sampled from the pixel population without
/// replacement; after one nearest-center assignment each center moves to
/// the mean of its pixels. Centers that attracted no pixels keep their
/// seed value, so the palette never shrinks below the clamped size.
pub fn quantize(image: &RgbImage, palette_size: u32) -> Quantized {
    let pixels: Vec<[f32; 3]> = image
        .pixels()
        .map(|p| [f32::from(p[0]), f32::from(p[1]), f32::from(p[2])])
        .collect();
    let n = pixels.len();
    if n == 0 {
        return Quantized {
            labels: Vec::new(),
            palette: Vec::new(),
        };
    }

    let k = (palette_size as usize).max(2).min(n);

    let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
    let mut centers: Vec<[f32; 3]> = rand::seq::index::sample(&mut rng, n, k)
        .iter()
        .map(|i| pixels[i])
        .collect();

    // Assign every pixel to its nearest center by squared distance.
    let mut labels = vec![0u32; n];
    let mut sums = vec![[0f32; 3]; k];
    let mut counts = vec![0u32; k];
    for (label, px) in labels.iter_mut().zip(&pixels) {
        let best = nearest_center(&centers, px);
        *label = best as u32;
        counts[best] += 1;
        for c in 0..3 {
            sums[best][c] += px[c];
        }
    }

    // Single update step: each center moves to the mean of its pixels.
    for ((center, sum), &count) in centers.iter_mut().zip(&sums).zip(&counts) {
        if count > 0 {
            for c in 0..3 {
                center[c] = sum[c] / count as f32;
            }
        }
    }

    let palette = centers
        .iter()
        .map(|c| {
            Rgb([
                c[0].round().clamp(0.0, 255.0) as u8,
                c[1].round().clamp(0.0, 255.0) as u8,
                c[2].round().clamp(0.0, 255.0) as u8,
            ])
        })
        .collect();

    Quantized { labels, palette }
}

/// Materialize a label map as an RGB image of the given dimensions.
pub fn map_to_palette(quantized: &Quantized, width: u32, height: u32) -> RgbImage {
    debug_assert_eq!(quantized.labels.len(), (width * height) as usize);
    let data = quantized
        .labels
        .iter()
        .flat_map(|&label| quantized.palette[label as usize].0)
        .collect();
    RgbImage::from_raw(width, height, data).expect("label count matches dimensions")
}

fn nearest_center(centers: &[[f32; 3]], px: &[f32; 3]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let dr = px[0] - center[0];
        let dg = px[1] - center[1];
        let db = px[2] - center[2];
        let dist = dr * dr + dg * dg + db * db;
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
