//! Color parsing for style parameters.
//!
//! Callers pass colors as hex strings (`#RGB`, `#RRGGBB`, `#RRGGBBAA`, hash
//! optional) or one of a small set of CSS color names. The empty string,
//! `none` and `transparent` are an explicit "no color" value rather than a
//! sentinel to be string-compared downstream.

use std::str::FromStr;

use image::Rgba;
use thiserror::Error;

/// Error type for parsing color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 6 or 8 digits after
    /// stripping '#') and is not a recognized color name.
    #[error("unrecognized color (expected a CSS name or 3/6/8 hex digits)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered.
    #[error("invalid hex digit: {0}")]
    InvalidHex(#[from] std::num::ParseIntError),
}

/// A requested fill: either a concrete color or explicitly transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec {
    /// Solid RGBA fill.
    Solid(Rgba<u8>),
    /// No fill at all (fully transparent layer).
    Transparent,
}

impl FromStr for ColorSpec {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("transparent")
        {
            return Ok(ColorSpec::Transparent);
        }
        parse_color(trimmed).map(ColorSpec::Solid)
    }
}

/// Parse a concrete color from a hex string or CSS color name.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ParseColorError> {
    let trimmed = s.trim();
    if let Some(named) = named_color(trimmed) {
        return Ok(named);
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.is_ascii() {
        return Err(ParseColorError::InvalidLength);
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16)?;
            let g = u8::from_str_radix(&hex[1..2], 16)?;
            let b = u8::from_str_radix(&hex[2..3], 16)?;
            // Shorthand digits expand by repetition: #fa0 == #ffaa00
            Ok(Rgba([r * 17, g * 17, b * 17, 255]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16)?;
            let g = u8::from_str_radix(&hex[2..4], 16)?;
            let b = u8::from_str_radix(&hex[4..6], 16)?;
            Ok(Rgba([r, g, b, 255]))
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16)?;
            let g = u8::from_str_radix(&hex[2..4], 16)?;
            let b = u8::from_str_radix(&hex[4..6], 16)?;
            let a = u8::from_str_radix(&hex[6..8], 16)?;
            Ok(Rgba([r, g, b, a]))
        }
        _ => Err(ParseColorError::InvalidLength),
    }
}

/// The 16 basic CSS color names plus a few common aliases.
fn named_color(name: &str) -> Option<Rgba<u8>> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" => [0x00, 0x00, 0x00],
        "white" => [0xFF, 0xFF, 0xFF],
        "red" => [0xFF, 0x00, 0x00],
        "lime" => [0x00, 0xFF, 0x00],
        "blue" => [0x00, 0x00, 0xFF],
        "yellow" => [0xFF, 0xFF, 0x00],
        "cyan" | "aqua" => [0x00, 0xFF, 0xFF],
        "magenta" | "fuchsia" => [0xFF, 0x00, 0xFF],
        "gray" | "grey" => [0x80, 0x80, 0x80],
        "silver" => [0xC0, 0xC0, 0xC0],
        "maroon" => [0x80, 0x00, 0x00],
        "olive" => [0x80, 0x80, 0x00],
        "green" => [0x00, 0x80, 0x00],
        "purple" => [0x80, 0x00, 0x80],
        "teal" => [0x00, 0x80, 0x80],
        "navy" => [0x00, 0x00, 0x80],
        "orange" => [0xFF, 0xA5, 0x00],
        _ => return None,
    };
    Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
}
