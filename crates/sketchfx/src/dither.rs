//! Floyd-Steinberg error diffusion against a fixed palette.
//!
//! Used by the pixelation pipeline when dithered shading is requested: the
//! downsampled intermediate is re-quantized to the adaptive palette with the
//! quantization error pushed onto unvisited neighbors.
//!
//! The kernel distributes 100% of the error to 4 neighbors:
//!
//! ```text
//!        X   7
//!    3   5   1     (sixteenths)
//! ```

use image::{Rgb, RgbImage};

/// Re-quantize `image` to `palette`, diffusing the per-pixel error.
pub fn floyd_steinberg(image: &RgbImage, palette: &[Rgb<u8>]) -> RgbImage {
    if palette.is_empty() {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut buf: Vec<[f32; 3]> = image
        .pixels()
        .map(|p| [f32::from(p[0]), f32::from(p[1]), f32::from(p[2])])
        .collect();
    let mut out = vec![0u8; w * h * 3];

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let old = buf[idx];
            let chosen = palette[nearest(palette, &old)].0;
            out[idx * 3..idx * 3 + 3].copy_from_slice(&chosen);

            let err = [
                old[0] - f32::from(chosen[0]),
                old[1] - f32::from(chosen[1]),
                old[2] - f32::from(chosen[2]),
            ];
            if x + 1 < w {
                spread(&mut buf[idx + 1], &err, 7.0 / 16.0);
            }
            if y + 1 < h {
                if x > 0 {
                    spread(&mut buf[idx + w - 1], &err, 3.0 / 16.0);
                }
                spread(&mut buf[idx + w], &err, 5.0 / 16.0);
                if x + 1 < w {
                    spread(&mut buf[idx + w + 1], &err, 1.0 / 16.0);
                }
            }
        }
    }

    RgbImage::from_raw(width, height, out).expect("buffer length matches dimensions")
}

fn spread(px: &mut [f32; 3], err: &[f32; 3], weight: f32) {
    for c in 0..3 {
        px[c] += err[c] * weight;
    }
}

fn nearest(palette: &[Rgb<u8>], px: &[f32; 3]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, color) in palette.iter().enumerate() {
        let dr = px[0] - f32::from(color.0[0]);
        let dg = px[1] - f32::from(color.0[1]);
        let db = px[2] - f32::from(color.0[2]);
        let dist = dr * dr + dg * dg + db * db;
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
