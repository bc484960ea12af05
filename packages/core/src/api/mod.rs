//! HTTP surface: thin axum handlers over the [`HolidayResolver`].

pub mod headers;
pub mod health;
pub mod holidays;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::holidays::HolidayResolver;
use crate::metrics::AppMetrics;

/// Assemble the full application router (shared by `main.rs` and tests).
pub fn app_router(resolver: HolidayResolver, metrics: Arc<AppMetrics>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .with_state(resolver.clone())
        .merge(
            Router::new()
                .route("/metrics", get(render_metrics))
                .with_state(metrics.clone()),
        )
        .merge(holidays::create_holidays_router(resolver))
        .layer(middleware::from_fn_with_state(metrics, track_http_metrics))
        .layer(cors)
}

async fn render_metrics(State(metrics): State<Arc<AppMetrics>>) -> Response {
    match metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Failed to render metrics: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, Body::from("metrics error")).into_response()
        }
    }
}

/// Record request count and latency, labelled by the matched route template
/// so path parameters do not explode label cardinality.
async fn track_http_metrics(
    State(metrics): State<Arc<AppMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), path.as_str(), response.status().as_str()])
        .inc();
    metrics
        .http_request_duration
        .observe(started.elapsed().as_secs_f64());

    response
}
