//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code.
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200).
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image with the right content type.
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    let content_type = response
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());
    assert_eq!(
        content_type,
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert response is a client error carrying a JSON error body that
/// mentions the given text, and that no image bytes were produced.
pub fn assert_client_error(response: &TestResponse, mentions: &str) {
    assert_status(response, StatusCode::BAD_REQUEST);
    assert!(!response.is_png(), "Error response must not contain a PNG");

    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(400));
    let message = json["error"].as_str().unwrap_or_default();
    assert!(
        message.contains(mentions),
        "Expected error mentioning {mentions:?}, got {message:?}"
    );
}
