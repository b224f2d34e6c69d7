use axum::{extract::Multipart, response::Response};
use utoipa::ToSchema;

use sketchfx::{compose_icon, IconOptions};

use crate::api::forms::{require_range, UploadForm};
use crate::api::{decode_upload, encode_png, png_response};
use crate::error::ApiError;

/// Form fields accepted by `POST /iconize` (multipart/form-data).
#[derive(Debug, ToSchema)]
#[allow(dead_code)] // schema-only: the handler decodes multipart by hand
pub struct IconizeForm {
    /// Sketch image to transform (PNG, JPEG, GIF, BMP or WebP)
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Foreground fill as hex string or CSS name (default `#111111`)
    pub fg_color: Option<String>,
    /// Background fill, or empty/"none"/"transparent" (default transparent)
    pub bg_color: Option<String>,
    /// Outline fill (default `#000000`)
    pub stroke_color: Option<String>,
    /// Luma cut separating ink from background, 0-255 (default 200)
    pub threshold: Option<i32>,
    /// Outline width in pixels, 0 disables the stroke (default 0)
    pub stroke_px: Option<u32>,
}

/// Turn a sketch into a flat-colored icon
///
/// Binarizes the upload into an ink mask, cleans the mask up, optionally
/// derives an outline band, and composites flat-colored layers into an
/// RGBA PNG of the same dimensions.
#[utoipa::path(
    post,
    path = "/iconize",
    request_body(content = IconizeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Flat-colored RGBA icon", content_type = "image/png"),
        (status = 400, description = "Undecodable image or out-of-domain parameter", body = crate::error::ErrorResponse),
        (status = 500, description = "Processing failure", body = crate::error::ErrorResponse),
    ),
    tag = "Transforms"
)]
pub async fn handle_iconize(multipart: Multipart) -> Result<Response, ApiError> {
    let form = UploadForm::collect(multipart).await?;

    // Validate every parameter before any pipeline stage runs.
    let foreground = form.solid_color("fg_color", "#111111")?;
    let background = form.color_field("bg_color", "")?;
    let stroke_color = form.solid_color("stroke_color", "#000000")?;
    let threshold = require_range(form.parse_field("threshold", 200i32)?, 0..=255, "threshold")?;
    let stroke_px: u32 = form.parse_field("stroke_px", 0)?;

    let image = decode_upload(form.file()?)?;

    tracing::info!(
        width = image.width(),
        height = image.height(),
        threshold,
        stroke_px,
        "Iconize request"
    );

    let options = IconOptions {
        foreground,
        background,
        stroke_color,
        threshold,
        stroke_px,
    };

    // The pipeline is pure CPU work; keep it off the async reactor.
    let png_bytes = tokio::task::spawn_blocking(move || {
        let icon = compose_icon(&image, &options);
        encode_png(image::DynamicImage::ImageRgba8(icon))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("task error: {e}")))??;

    tracing::info!(size_bytes = png_bytes.len(), "Icon rendered successfully");

    Ok(png_response(png_bytes))
}
