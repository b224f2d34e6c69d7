//! sketchfx: stylized transforms for raster sketches
//!
//! Two stateless, purely functional pipelines over in-memory bitmaps:
//!
//! - [`compose_icon`]: binarize a sketch into an ink mask, clean it up,
//!   optionally derive an outline band, and composite flat-colored layers
//!   into an RGBA icon.
//! - [`pixelate`]: reduce an image to a small representative palette and
//!   resample it into visible square blocks.
//!
//! Every stage takes an image and returns a new one; nothing is mutated in
//! place and no state survives a call.
//!
//! # Quick Start
//!
//! ```
//! use sketchfx::{compose_icon, IconOptions};
//!
//! let sketch = image::DynamicImage::new_rgb8(32, 32);
//! let icon = compose_icon(&sketch, &IconOptions::default());
//!
//! assert_eq!(icon.dimensions(), (32, 32));
//! ```
//!
//! # Mask Convention
//!
//! Masks are single-channel images restricted to two values: 255 for ink
//! (drawn content) and 0 for background. With that orientation the 3x3
//! max-filter in [`thicken`] grows ink outward, out-of-bounds pixels count
//! as background, and a mask doubles directly as an alpha channel.

pub mod color;
pub mod error;
pub mod icon;
pub mod mask;
pub mod pixelate;
pub mod quantize;

mod dither;

pub use color::{ColorSpec, ParseColorError};
pub use error::StyleError;
pub use icon::{compose_icon, IconOptions};
pub use mask::{binarize, smooth_edges, stroke_from_mask, thicken, Mask, BACKGROUND, INK};
pub use pixelate::{pixelate, PixelateOptions};
pub use quantize::{map_to_palette, quantize, Quantized};
