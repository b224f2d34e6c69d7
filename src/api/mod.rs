pub mod forms;
pub mod iconize;
pub mod pixelate;

pub use iconize::{handle_iconize, IconizeForm, __path_handle_iconize};
pub use pixelate::{handle_pixelate, PixelateForm, __path_handle_pixelate};

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Encode a finished transform to PNG bytes.
pub(crate) fn encode_png(image: image::DynamicImage) -> Result<Vec<u8>, ApiError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Wrap PNG bytes in a binary `image/png` response.
pub(crate) fn png_response(png_bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response()
}

/// Decode uploaded bytes into an image, rejecting undecodable input as a
/// client error.
pub(crate) fn decode_upload(bytes: &[u8]) -> Result<image::DynamicImage, ApiError> {
    image::load_from_memory(bytes).map_err(|e| ApiError::InvalidImage(e.to_string()))
}
