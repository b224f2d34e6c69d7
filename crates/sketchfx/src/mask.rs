//! Ink mask production and refinement.
//!
//! A [`Mask`] is a single-channel image restricted to exactly two values:
//! [`INK`] (255) for drawn content and [`BACKGROUND`] (0). Every function in
//! this module returns a fresh buffer and re-establishes that invariant, so
//! masks can be chained and used directly as alpha channels.

use image::{imageops, DynamicImage, GrayImage, Luma};

/// Mask value for drawn content.
pub const INK: u8 = 255;

/// Mask value for background.
pub const BACKGROUND: u8 = 0;

/// Midpoint cut used to re-binarize after a blur.
const MIDPOINT: u8 = 127;

/// Two-tone single-channel image. Invariant: every pixel is [`INK`] or
/// [`BACKGROUND`].
pub type Mask = GrayImage;

/// Threshold an image into an ink mask.
///
/// The image is converted to grayscale; pixels at or below `threshold`
/// become ink, brighter pixels become background (sketches are dark lines
/// on a light ground). The threshold is deliberately lenient: out-of-range
/// values are not an error, they just produce a degenerate all-ink or
/// all-background mask.
pub fn binarize(image: &DynamicImage, threshold: i32) -> Mask {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    let data = gray
        .as_raw()
        .iter()
        .map(|&p| if i32::from(p) <= threshold { INK } else { BACKGROUND })
        .collect();
    GrayImage::from_raw(width, height, data).expect("buffer length matches dimensions")
}

/// Knock the aliasing out of a mask edge.
///
/// Applies a Gaussian blur of the given sigma, then re-binarizes at the
/// midpoint so the result is two-tone again.
pub fn smooth_edges(mask: &Mask, sigma: f32) -> Mask {
    let blurred = imageops::blur(mask, sigma);
    let (width, height) = blurred.dimensions();
    let data = blurred
        .as_raw()
        .iter()
        .map(|&p| if p > MIDPOINT { INK } else { BACKGROUND })
        .collect();
    GrayImage::from_raw(width, height, data).expect("buffer length matches dimensions")
}

/// Morphological dilation: grow ink regions by one pixel per iteration.
///
/// Each round replaces every pixel with the maximum of its 3x3 neighborhood,
/// treating out-of-bounds as background. The 3x3 max is separable, so each
/// round is two slice-level passes (rows, then columns) instead of a
/// per-pixel neighborhood gather -- iteration count and image size both
/// scale the cost, and this is the hottest loop in the icon pipeline.
pub fn thicken(mask: &Mask, iterations: u32) -> Mask {
    let (width, height) = mask.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut cur = mask.as_raw().clone();
    let mut tmp = vec![BACKGROUND; cur.len()];

    for _ in 0..iterations {
        vertical_max3(&cur, &mut tmp, w, h);
        horizontal_max3(&tmp, &mut cur, w, h);
    }

    GrayImage::from_raw(width, height, cur).expect("buffer length matches dimensions")
}

/// Per-column max over a 3-row window, a whole row at a time.
fn vertical_max3(src: &[u8], dst: &mut [u8], w: usize, h: usize) {
    for y in 0..h {
        let (row_start, row_end) = (y * w, (y + 1) * w);
        let out = &mut dst[row_start..row_end];
        out.copy_from_slice(&src[row_start..row_end]);
        if y > 0 {
            for (o, &p) in out.iter_mut().zip(&src[row_start - w..row_start]) {
                if p > *o {
                    *o = p;
                }
            }
        }
        if y + 1 < h {
            for (o, &p) in out.iter_mut().zip(&src[row_end..row_end + w]) {
                if p > *o {
                    *o = p;
                }
            }
        }
    }
}

/// Max over a 3-column window within each row.
fn horizontal_max3(src: &[u8], dst: &mut [u8], w: usize, h: usize) {
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let out = &mut dst[y * w..(y + 1) * w];
        for x in 0..w {
            let mut m = row[x];
            if x > 0 && row[x - 1] > m {
                m = row[x - 1];
            }
            if x + 1 < w && row[x + 1] > m {
                m = row[x + 1];
            }
            out[x] = m;
        }
    }
}

/// Derive an outline band from a mask.
///
/// Dilates the mask by `max(1, width / 2)` rounds to obtain an outer mask,
/// then subtracts the original: what remains is the ring of pixels the
/// dilation added. A non-positive width yields an all-background mask.
pub fn stroke_from_mask(mask: &Mask, width: i32) -> Mask {
    let (w, h) = mask.dimensions();
    if width <= 0 {
        return GrayImage::from_pixel(w, h, Luma([BACKGROUND]));
    }

    let iterations = (width / 2).max(1) as u32;
    let outer = thicken(mask, iterations);

    // Dilation only ever turns background into ink, so the pointwise
    // saturating difference is exactly the added ring.
    let data = outer
        .as_raw()
        .iter()
        .zip(mask.as_raw())
        .map(|(&o, &i)| o.saturating_sub(i))
        .collect();
    GrayImage::from_raw(w, h, data).expect("buffer length matches dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn is_two_tone(mask: &Mask) -> bool {
        mask.as_raw().iter().all(|&p| p == INK || p == BACKGROUND)
    }

    fn ink_count(mask: &Mask) -> usize {
        mask.as_raw().iter().filter(|&&p| p == INK).count()
    }

    /// 8x8 grayscale image: left half black, right half white.
    fn half_black_image() -> DynamicImage {
        let gray = GrayImage::from_fn(8, 8, |x, _| if x < 4 { Luma([0]) } else { Luma([255]) });
        DynamicImage::ImageLuma8(gray)
    }

    fn blob_mask(size: u32) -> Mask {
        let mut mask = GrayImage::from_pixel(size, size, Luma([BACKGROUND]));
        mask.put_pixel(size / 2, size / 2, Luma([INK]));
        mask
    }

    #[test]
    fn test_binarize_is_two_tone() {
        let mask = binarize(&half_black_image(), 128);
        assert!(is_two_tone(&mask));
    }

    #[test]
    fn test_binarize_dark_pixels_become_ink() {
        let mask = binarize(&half_black_image(), 128);
        assert_eq!(mask.get_pixel(0, 0).0[0], INK);
        assert_eq!(mask.get_pixel(7, 0).0[0], BACKGROUND);
    }

    #[test]
    fn test_binarize_degenerate_thresholds() {
        let image = half_black_image();
        // Below any luminance: nothing qualifies as ink.
        let mask = binarize(&image, -1);
        assert_eq!(ink_count(&mask), 0);
        // At or above max luminance: everything is ink.
        let mask = binarize(&image, 300);
        assert_eq!(ink_count(&mask), 64);
    }

    #[test]
    fn test_smooth_edges_is_two_tone() {
        let mask = binarize(&half_black_image(), 128);
        let smoothed = smooth_edges(&mask, 1.2);
        assert!(is_two_tone(&smoothed));
        assert_eq!(smoothed.dimensions(), mask.dimensions());
    }

    #[test]
    fn test_smooth_edges_keeps_interior() {
        let mask = binarize(&half_black_image(), 128);
        let smoothed = smooth_edges(&mask, 1.2);
        // Pixels far from the edge are untouched by a sigma ~1 blur.
        assert_eq!(smoothed.get_pixel(0, 4).0[0], INK);
        assert_eq!(smoothed.get_pixel(7, 4).0[0], BACKGROUND);
    }

    #[test]
    fn test_thicken_grows_single_pixel_to_block() {
        let mask = blob_mask(5);
        let grown = thicken(&mask, 1);
        assert!(is_two_tone(&grown));
        assert_eq!(ink_count(&grown), 9);
        for y in 1..=3 {
            for x in 1..=3 {
                assert_eq!(grown.get_pixel(x, y).0[0], INK, "({x},{y}) should be ink");
            }
        }
    }

    #[test]
    fn test_thicken_zero_iterations_is_identity() {
        let mask = blob_mask(5);
        assert_eq!(thicken(&mask, 0).as_raw(), mask.as_raw());
    }

    #[test]
    fn test_thicken_is_monotonic() {
        let mask = blob_mask(11);
        for k in 1..5u32 {
            let prev = thicken(&mask, k - 1);
            let next = thicken(&mask, k);
            for (p, n) in prev.as_raw().iter().zip(next.as_raw()) {
                assert!(n >= p, "ink set must grow with iteration count");
            }
            assert!(ink_count(&next) > ink_count(&prev));
        }
    }

    #[test]
    fn test_thicken_treats_out_of_bounds_as_background() {
        let mut mask = GrayImage::from_pixel(4, 4, Luma([BACKGROUND]));
        mask.put_pixel(0, 0, Luma([INK]));
        let grown = thicken(&mask, 1);
        // The corner pixel grows into a 2x2 block; nothing wraps around.
        assert_eq!(ink_count(&grown), 4);
        assert_eq!(grown.get_pixel(3, 3).0[0], BACKGROUND);
        assert_eq!(grown.get_pixel(3, 0).0[0], BACKGROUND);
    }

    #[test]
    fn test_stroke_zero_width_is_all_background() {
        let mask = blob_mask(7);
        let stroke = stroke_from_mask(&mask, 0);
        assert_eq!(ink_count(&stroke), 0);
        let stroke = stroke_from_mask(&mask, -3);
        assert_eq!(ink_count(&stroke), 0);
    }

    #[test]
    fn test_stroke_is_ring_outside_ink() {
        let mask = blob_mask(7);
        let stroke = stroke_from_mask(&mask, 2);
        assert!(is_two_tone(&stroke));
        // The band is disjoint from the original ink.
        for (s, m) in stroke.as_raw().iter().zip(mask.as_raw()) {
            assert!(!(*s == INK && *m == INK));
        }
        // One dilation round around a single pixel leaves an 8-pixel ring.
        assert_eq!(ink_count(&stroke), 8);
    }

    #[test]
    fn test_stroke_width_one_still_strokes() {
        let mask = blob_mask(7);
        // width / 2 rounds to zero; the generator still runs one round.
        let stroke = stroke_from_mask(&mask, 1);
        assert_eq!(ink_count(&stroke), 8);
    }
}
