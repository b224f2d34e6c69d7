use axum::{extract::Multipart, response::Response};
use utoipa::ToSchema;

use sketchfx::{pixelate, PixelateOptions};

use crate::api::forms::{require_range, UploadForm};
use crate::api::{decode_upload, encode_png, png_response};
use crate::error::ApiError;

/// Form fields accepted by `POST /pixelate` (multipart/form-data).
#[derive(Debug, ToSchema)]
#[allow(dead_code)] // schema-only: the handler decodes multipart by hand
pub struct PixelateForm {
    /// Image to transform (PNG, JPEG, GIF, BMP or WebP)
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Number of palette colors, 2-64 (default 8)
    pub palette_size: Option<u32>,
    /// Edge length of the square pixel blocks, at least 1 (default 8)
    pub pixel_size: Option<u32>,
    /// Apply error-diffusion dithering to the blocks (default false)
    pub dither: Option<bool>,
}

/// Turn an image into pixel art
///
/// Reduces the upload to a small representative palette and resamples it
/// into visible square blocks, returning an RGB PNG of the same dimensions.
#[utoipa::path(
    post,
    path = "/pixelate",
    request_body(content = PixelateForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Palette-reduced, blocked RGB image", content_type = "image/png"),
        (status = 400, description = "Undecodable image or out-of-domain parameter", body = crate::error::ErrorResponse),
        (status = 500, description = "Processing failure", body = crate::error::ErrorResponse),
    ),
    tag = "Transforms"
)]
pub async fn handle_pixelate(multipart: Multipart) -> Result<Response, ApiError> {
    let form = UploadForm::collect(multipart).await?;

    let palette_size =
        require_range(form.parse_field("palette_size", 8u32)?, 2..=64, "palette_size")?;
    let pixel_size = form.parse_field("pixel_size", 8u32)?;
    if pixel_size == 0 {
        return Err(ApiError::InvalidParameter {
            field: "pixel_size",
            reason: "must be at least 1".to_string(),
        });
    }
    let dither = form.bool_field("dither", false)?;

    let image = decode_upload(form.file()?)?;

    tracing::info!(
        width = image.width(),
        height = image.height(),
        palette_size,
        pixel_size,
        dither,
        "Pixelate request"
    );

    let options = PixelateOptions {
        palette_size,
        block_size: pixel_size,
        dither,
    };

    let png_bytes = tokio::task::spawn_blocking(move || {
        let blocked = pixelate(&image, &options)
            // Parameters were validated above; a pipeline failure here is
            // an internal fault, not caller input.
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        encode_png(image::DynamicImage::ImageRgb8(blocked))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("task error: {e}")))??;

    tracing::info!(size_bytes = png_bytes.len(), "Pixel art rendered successfully");

    Ok(png_response(png_bytes))
}
