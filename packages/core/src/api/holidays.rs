//! Holiday API endpoints
//!
//! Routes:
//! - `GET /holidays/countries`
//! - `GET /holidays/:country/:year` (holidays grouped by month)
//! - `GET /holidays/is-public-holiday/:country/:date`
//! - `GET /holidays/is-work-day/:country/:date`
//! - `GET /holidays/day-status/:country/:date`
//! - `GET /holidays/max-consecutive-free-days/:country/:year`
//!
//! Dates are ISO `YYYY-MM-DD`.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::holidays::{DayStatus, HolidayResolver};
use super::headers::etagged_json;

/// Shared state for the holiday routes.
pub type HolidaysState = HolidayResolver;

/// Create the holiday API router
pub fn create_holidays_router(resolver: HolidaysState) -> Router {
    Router::new()
        .route("/holidays/countries", get(get_countries))
        .route("/holidays/:country/:year", get(get_holidays))
        .route("/holidays/is-public-holiday/:country/:date", get(is_public_holiday))
        .route("/holidays/is-work-day/:country/:date", get(is_work_day))
        .route("/holidays/day-status/:country/:date", get(get_day_status))
        .route(
            "/holidays/max-consecutive-free-days/:country/:year",
            get(get_max_consecutive_free_days),
        )
        .with_state(resolver)
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

async fn get_countries(
    State(resolver): State<HolidaysState>,
    request_headers: HeaderMap,
) -> Result<Response, AppError> {
    let countries = resolver.get_countries().await?;
    etagged_json(&countries, &request_headers)
}

async fn get_holidays(
    State(resolver): State<HolidaysState>,
    Path((country, year)): Path<(String, i32)>,
    request_headers: HeaderMap,
) -> Result<Response, AppError> {
    let months = resolver.get_holidays_by_month(&country, year).await?;
    etagged_json(&months, &request_headers)
}

async fn is_public_holiday(
    State(resolver): State<HolidaysState>,
    Path((country, date)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let date = parse_date(&date)?;
    let is_public_holiday = resolver.is_public_holiday(&country, date).await?;
    Ok(Json(json!({ "is_public_holiday": is_public_holiday })))
}

async fn is_work_day(
    State(resolver): State<HolidaysState>,
    Path((country, date)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let date = parse_date(&date)?;
    let is_work_day = resolver.is_work_day(&country, date).await?;
    Ok(Json(json!({ "is_work_day": is_work_day })))
}

async fn get_day_status(
    State(resolver): State<HolidaysState>,
    Path((country, date)): Path<(String, String)>,
) -> Result<Json<DayStatus>, AppError> {
    let date = parse_date(&date)?;
    let status = resolver.get_specific_day_status(&country, date).await?;
    Ok(Json(status))
}

async fn get_max_consecutive_free_days(
    State(resolver): State<HolidaysState>,
    Path((country, year)): Path<(String, i32)>,
) -> Result<Json<Value>, AppError> {
    let days = resolver.get_max_consecutive_free_days(&country, year).await?;
    Ok(Json(json!({ "max_consecutive_free_days": days })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date("2023-12-25").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()
        );
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(matches!(parse_date("25/12/2023"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_date("2023-02-30"), Err(AppError::BadRequest(_))));
    }
}
