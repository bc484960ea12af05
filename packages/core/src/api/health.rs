use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Json},
};

use crate::holidays::HolidayResolver;

pub async fn health(State(resolver): State<HolidayResolver>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(serde_json::json!({
            "status": "ok",
            "provider": resolver.provider_name(),
        })),
    )
}
