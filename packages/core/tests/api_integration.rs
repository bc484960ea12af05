//! Integration tests for all API endpoints.
//!
//! Each test boots the full Axum router (same assembly as `main.rs`) using
//! `tower::ServiceExt::oneshot`, with no live server or live Kayaposoft API needed.
//!
//! `build_test_app()` wires together:
//! - A wiremocked Kayaposoft `/json/v2.0/` endpoint behind the real
//!   `KayaposoftHolidayProvider`
//! - An in-memory SQLite pool with all migrations applied, behind
//!   `HolidayRepository`
//! - Prometheus `AppMetrics`
//! - The complete `Router<()>` returned ready for `oneshot`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use holiday_resolver::{
    api,
    db,
    holidays::{kayaposoft_adapter::KayaposoftHolidayProvider, HolidayResolver},
    metrics::AppMetrics,
    repository::HolidayRepository,
    services::kayaposoft::KayaposoftClient,
};

// ---- Helpers ----------------------------------------------------------------

const FAKE_COUNTRIES: &str = r#"[
    {
        "countryCode": "usa",
        "regions": ["al", "ak", "az"],
        "holidayTypes": ["public_holiday"],
        "fullName": "United States of America",
        "fromDate": {"day": 1, "month": 1, "year": 2011},
        "toDate": {"day": 31, "month": 12, "year": 2100}
    },
    {
        "countryCode": "deu",
        "regions": ["bw", "by"],
        "holidayTypes": ["public_holiday", "observance"],
        "fullName": "Germany",
        "fromDate": {"day": 1, "month": 1, "year": 2011},
        "toDate": {"day": 31, "month": 12, "year": 2100}
    }
]"#;

const FAKE_USA_2023: &str = r#"[
    {
        "date": {"day": 2, "month": 1, "year": 2023, "dayOfWeek": 1},
        "name": [{"lang": "en", "text": "New Year's Day"}],
        "holidayType": "public_holiday"
    },
    {
        "date": {"day": 4, "month": 7, "year": 2023, "dayOfWeek": 2},
        "name": [{"lang": "en", "text": "Independence Day"}],
        "holidayType": "public_holiday"
    },
    {
        "date": {"day": 25, "month": 12, "year": 2023, "dayOfWeek": 1},
        "name": [{"lang": "en", "text": "Christmas Day"}],
        "holidayType": "public_holiday"
    }
]"#;

const FAKE_UNSUPPORTED: &str = r#"{"error": "Country 'US' is not supported"}"#;

/// Build the complete test router.
///
/// The country list and the usa/2023 holidays are each expected to be
/// requested exactly once; the `MockServer` verifies this when dropped, so it
/// must stay alive for the duration of the test.
async fn build_test_app() -> (Router, MockServer) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/v2.0/"))
        .and(query_param("action", "getSupportedCountries"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FAKE_COUNTRIES, "application/json"))
        .expect(0..=1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json/v2.0/"))
        .and(query_param("action", "getHolidaysForYear"))
        .and(query_param("country", "usa"))
        .and(query_param("year", "2023"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FAKE_USA_2023, "application/json"))
        .expect(0..=1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json/v2.0/"))
        .and(query_param("action", "getHolidaysForYear"))
        .and(query_param("country", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FAKE_UNSUPPORTED, "application/json"))
        .mount(&mock_server)
        .await;

    // ---- In-memory DB + repository ----
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let repository = Arc::new(HolidayRepository::new(pool));

    // ---- Provider ----
    let provider = Arc::new(KayaposoftHolidayProvider::new(KayaposoftClient::new(
        mock_server.uri(),
    )));

    // ---- Metrics ----
    let metrics = Arc::new(AppMetrics::new().unwrap());

    let resolver = HolidayResolver::new(repository, provider).with_metrics(metrics.clone());
    (api::app_router(resolver, metrics), mock_server)
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Convenience: collect body bytes and parse as JSON.
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---- GET /health ------------------------------------------------------------

#[tokio::test]
async fn health_returns_200_with_provider_name() {
    let (app, _mock) = build_test_app().await;
    let resp = get(&app, "/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider"], "Kayaposoft");
}

// ---- GET /holidays/countries ------------------------------------------------

#[tokio::test]
async fn countries_are_fetched_once_then_served_from_store() {
    let (app, mock) = build_test_app().await;

    let first = get(&app, "/holidays/countries").await;
    assert_eq!(first.status(), StatusCode::OK);
    let json = json_body(first.into_body()).await;
    let countries = json.as_array().unwrap();
    assert_eq!(countries.len(), 2);
    // The provider lists usa first; both answers are ordered by code.
    assert_eq!(json[0]["code"], "deu");

    let second = get(&app, "/holidays/countries").await;
    let stored = json_body(second.into_body()).await;
    assert_eq!(stored, json);
    assert_eq!(stored[1]["full_name"], "United States of America");

    let requests = mock.received_requests().await.unwrap();
    let country_calls = requests
        .iter()
        .filter(|r| r.url.query().unwrap_or_default().contains("getSupportedCountries"))
        .count();
    assert_eq!(country_calls, 1);
}

#[tokio::test]
async fn countries_response_honours_if_none_match() {
    let (app, _mock) = build_test_app().await;

    let first = get(&app, "/holidays/countries").await;
    let etag = first.headers().get(header::ETAG).unwrap().clone();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/holidays/countries")
                .header(header::IF_NONE_MATCH, etag)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
}

// ---- GET /holidays/:country/:year -------------------------------------------

#[tokio::test]
async fn holidays_for_year_are_grouped_by_month() {
    let (app, _mock) = build_test_app().await;
    let resp = get(&app, "/holidays/usa/2023").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp.into_body()).await;
    let months = json.as_array().unwrap();
    assert_eq!(months.len(), 3);
    assert_eq!(months[0]["month"], 1);
    assert_eq!(months[0]["holidays"][0]["name"], "New Year's Day");
    assert_eq!(months[2]["month"], 12);
    assert_eq!(months[2]["holidays"][0]["date"], "2023-12-25");
}

#[tokio::test]
async fn upstream_error_yields_empty_holiday_list() {
    let (app, _mock) = build_test_app().await;
    let resp = get(&app, "/holidays/US/2023").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp.into_body()).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn non_numeric_year_is_rejected() {
    let (app, _mock) = build_test_app().await;
    let resp = get(&app, "/holidays/usa/next-year").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ---- GET /holidays/day-status/:country/:date --------------------------------

#[tokio::test]
async fn day_status_for_christmas_is_holiday_on_monday() {
    let (app, _mock) = build_test_app().await;
    let resp = get(&app, "/holidays/day-status/usa/2023-12-25").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp.into_body()).await;
    assert_eq!(json["status"], "Holiday");
    assert_eq!(json["day_of_week"], 1);
    assert_eq!(json["date"], "2023-12-25");
}

#[tokio::test]
async fn day_status_for_saturday_and_monday() {
    let (app, _mock) = build_test_app().await;

    let saturday = json_body(get(&app, "/holidays/day-status/usa/2023-09-23").await.into_body()).await;
    assert_eq!(saturday["status"], "Weekend");
    assert_eq!(saturday["day_of_week"], 6);

    let monday = json_body(get(&app, "/holidays/day-status/usa/2023-09-25").await.into_body()).await;
    assert_eq!(monday["status"], "WorkDay");
}

#[tokio::test]
async fn day_status_with_upstream_error_is_plain_work_day() {
    let (app, _mock) = build_test_app().await;
    let json = json_body(get(&app, "/holidays/day-status/US/2023-12-25").await.into_body()).await;
    assert_eq!(json["status"], "WorkDay");
}

#[tokio::test]
async fn invalid_date_is_rejected() {
    let (app, _mock) = build_test_app().await;
    let resp = get(&app, "/holidays/day-status/usa/2023-13-01").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = json_body(resp.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("2023-13-01"));
}

// ---- predicates -------------------------------------------------------------

#[tokio::test]
async fn is_public_holiday_and_is_work_day() {
    let (app, _mock) = build_test_app().await;

    let holiday = json_body(get(&app, "/holidays/is-public-holiday/usa/2023-07-04").await.into_body()).await;
    assert_eq!(holiday["is_public_holiday"], true);

    let not_holiday = json_body(get(&app, "/holidays/is-public-holiday/usa/2023-07-05").await.into_body()).await;
    assert_eq!(not_holiday["is_public_holiday"], false);

    let work_day = json_body(get(&app, "/holidays/is-work-day/usa/2023-07-05").await.into_body()).await;
    assert_eq!(work_day["is_work_day"], true);

    let not_work_day = json_body(get(&app, "/holidays/is-work-day/usa/2023-07-04").await.into_body()).await;
    assert_eq!(not_work_day["is_work_day"], false);
}

// ---- GET /holidays/max-consecutive-free-days/:country/:year -----------------

#[tokio::test]
async fn max_consecutive_free_days_counts_long_weekends() {
    let (app, _mock) = build_test_app().await;
    let json = json_body(
        get(&app, "/holidays/max-consecutive-free-days/usa/2023").await.into_body(),
    )
    .await;

    // Sat 23 .. Mon 25 December; the New Year weekend is cut at Jan 1.
    assert_eq!(json["max_consecutive_free_days"], 3);
}

#[tokio::test]
async fn out_of_range_year_is_rejected() {
    let (app, mock) = build_test_app().await;
    let resp = get(&app, "/holidays/max-consecutive-free-days/usa/999999").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = json_body(resp.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("999999"));
    assert!(mock.received_requests().await.unwrap().is_empty());
}

// ---- GET /metrics -----------------------------------------------------------

#[tokio::test]
async fn metrics_reflect_store_hits_and_provider_fetches() {
    let (app, _mock) = build_test_app().await;

    get(&app, "/holidays/usa/2023").await;
    get(&app, "/holidays/usa/2023").await;

    let resp = get(&app, "/metrics").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get("content-type").unwrap().to_str().unwrap().to_string();
    assert_eq!(ct, "text/plain; version=0.0.4");

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("holiday_resolver_provider_fetches_total 1"));
    assert!(body.contains("holiday_resolver_store_hits_total 1"));
    assert!(body.contains("holiday_resolver_http_requests_total"));
}
