use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
};

use crate::error::AppError;

/// Stored holiday data never changes once cached, so clients may keep it a day.
pub const HOLIDAY_DATA_MAX_AGE: u32 = 86_400;

/// Compute a quoted ETag from response bytes.
pub fn compute_etag(body: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

pub fn cache_control(max_age: u32) -> HeaderValue {
    HeaderValue::from_str(&format!("public, max-age={}", max_age))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

/// Returns true when `If-None-Match` contains `*` or the exact current ETag.
pub fn if_none_match_matches(headers: &HeaderMap, current_etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .map(|raw| {
            raw.split(',')
                .map(|tag| tag.trim())
                .any(|tag| tag == "*" || tag == current_etag)
        })
        .unwrap_or(false)
}

/// Serialize `payload` as JSON with ETag and Cache-Control, answering
/// `304 Not Modified` when the client already holds the same body.
pub fn etagged_json<T: serde::Serialize>(
    payload: &T,
    request_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let body = serde_json::to_vec(payload).map_err(|err| AppError::Internal(err.to_string()))?;
    let etag = compute_etag(&body);

    let builder = Response::builder()
        .header(header::CACHE_CONTROL, cache_control(HOLIDAY_DATA_MAX_AGE))
        .header(header::ETAG, etag.as_str());

    let response = if if_none_match_matches(request_headers, &etag) {
        builder.status(StatusCode::NOT_MODIFIED).body(Body::empty())
    } else {
        builder
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
    };

    response.map_err(|err| AppError::Internal(err.to_string()))
}
