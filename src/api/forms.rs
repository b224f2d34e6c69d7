//! Multipart form decoding shared by the transform endpoints.
//!
//! Both endpoints take one uploaded file plus a handful of scalar text
//! fields with defaults. Everything is validated here, before any pipeline
//! stage runs, and validation failures name the offending field.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use axum::extract::Multipart;
use image::Rgba;
use sketchfx::ColorSpec;

use crate::error::ApiError;

/// A collected multipart request: the uploaded file plus text fields.
pub struct UploadForm {
    file: Option<Vec<u8>>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain a multipart stream into memory.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut file = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                file = Some(bytes.to_vec());
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Multipart(e.to_string()))?;
                fields.insert(name, text);
            }
        }

        Ok(Self { file, fields })
    }

    /// The uploaded image bytes; required on every endpoint.
    pub fn file(&self) -> Result<&[u8], ApiError> {
        self.file.as_deref().ok_or(ApiError::MissingField("file"))
    }

    /// Integer-ish field with a default. A present-but-unparseable value is
    /// a client error, not a fallback to the default.
    pub fn parse_field<T>(&self, name: &'static str, default: T) -> Result<T, ApiError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.fields.get(name) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ApiError::InvalidParameter {
                field: name,
                reason: e.to_string(),
            }),
        }
    }

    /// Boolean field accepting the usual form spellings.
    pub fn bool_field(&self, name: &'static str, default: bool) -> Result<bool, ApiError> {
        match self.fields.get(name) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "on" | "yes" => Ok(true),
                "false" | "0" | "off" | "no" | "" => Ok(false),
                other => Err(ApiError::InvalidParameter {
                    field: name,
                    reason: format!("expected true or false, got {other:?}"),
                }),
            },
        }
    }

    /// Color field that must resolve to a concrete color.
    pub fn solid_color(&self, name: &'static str, default: &str) -> Result<Rgba<u8>, ApiError> {
        match self.color_field(name, default)? {
            ColorSpec::Solid(color) => Ok(color),
            ColorSpec::Transparent => Err(ApiError::InvalidParameter {
                field: name,
                reason: "must be a concrete color".to_string(),
            }),
        }
    }

    /// Color field that may be a concrete color or the transparent sentinel.
    pub fn color_field(&self, name: &'static str, default: &str) -> Result<ColorSpec, ApiError> {
        let raw = self.fields.get(name).map(String::as_str).unwrap_or(default);
        raw.parse().map_err(|e: sketchfx::ParseColorError| {
            ApiError::InvalidParameter {
                field: name,
                reason: e.to_string(),
            }
        })
    }
}

/// Reject a value outside its documented domain with a message naming both
/// the field and the bounds.
pub fn require_range<T>(
    value: T,
    range: std::ops::RangeInclusive<T>,
    field: &'static str,
) -> Result<T, ApiError>
where
    T: PartialOrd + Display + Copy,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::InvalidParameter {
            field,
            reason: format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        })
    }
}
