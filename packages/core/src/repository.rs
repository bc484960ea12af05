//! Database repository for holiday data persistence.
//!
//! All SQLite read/write logic lives here. [`HolidayRepository`] implements
//! [`HolidayStore`] so the resolver can persist provider results and serve
//! later lookups without going back to the provider.
//!
//! Dates are stored as ISO `YYYY-MM-DD` strings; list-valued fields are
//! stored as JSON text. Inserts use `INSERT OR IGNORE` against the unique
//! keys, so duplicate saves from concurrent fallbacks keep the first write.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::holidays::{
    error::StoreError,
    store::{HolidayQuery, HolidayStore},
    types::{Country, Holiday, HolidayKind, LocalizedText},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for reading and writing countries and holidays to SQLite.
pub struct HolidayRepository {
    pool: SqlitePool,
}

impl HolidayRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn country_from_row(row: &SqliteRow) -> Result<Country, StoreError> {
        let regions: String = row.try_get("regions")?;
        let holiday_kinds: String = row.try_get("holiday_kinds")?;
        let valid_from: String = row.try_get("valid_from")?;
        let valid_to: String = row.try_get("valid_to")?;

        Ok(Country {
            code: row.try_get("code")?,
            full_name: row.try_get("full_name")?,
            regions: decode_json(&regions)?,
            supported_holiday_kinds: decode_json::<BTreeSet<HolidayKind>>(&holiday_kinds)?,
            valid_from: parse_date(&valid_from)?,
            valid_to: parse_date(&valid_to)?,
        })
    }

    fn holiday_from_row(row: &SqliteRow) -> Result<Holiday, StoreError> {
        let date: String = row.try_get("date")?;
        let kind: String = row.try_get("kind")?;
        let translated_names: String = row.try_get("translated_names")?;
        let notes: String = row.try_get("notes")?;
        let flags: String = row.try_get("flags")?;
        let observed_on: Option<String> = row.try_get("observed_on")?;

        Ok(Holiday {
            country_code: row.try_get("country_code")?,
            name: row.try_get("name")?,
            translated_names: decode_json::<Vec<LocalizedText>>(&translated_names)?,
            date: parse_date(&date)?,
            kind: HolidayKind::new(kind),
            notes: decode_json::<Vec<LocalizedText>>(&notes)?,
            flags: decode_json::<BTreeSet<String>>(&flags)?,
            observed_on: observed_on.as_deref().map(parse_date).transpose()?,
        })
    }
}

#[async_trait]
impl HolidayStore for HolidayRepository {
    async fn find_countries(&self) -> Result<Vec<Country>, StoreError> {
        let rows = sqlx::query(
            "SELECT code, full_name, regions, holiday_kinds, valid_from, valid_to
             FROM countries
             ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::country_from_row).collect()
    }

    async fn find_holidays(
        &self,
        country_code: &str,
        query: HolidayQuery,
    ) -> Result<Vec<Holiday>, StoreError> {
        const COLUMNS: &str = "SELECT country_code, name, date, kind, translated_names, notes, flags, observed_on
             FROM holidays";

        let rows = match query {
            HolidayQuery::Year(year) => {
                sqlx::query(&format!(
                    "{} WHERE country_code = ? AND year = ? ORDER BY date ASC, name ASC, kind ASC",
                    COLUMNS
                ))
                .bind(country_code)
                .bind(year)
                .fetch_all(&self.pool)
                .await?
            }
            HolidayQuery::Date(date) => {
                sqlx::query(&format!(
                    "{} WHERE country_code = ? AND date = ? ORDER BY name ASC, kind ASC",
                    COLUMNS
                ))
                .bind(country_code)
                .bind(format_date(date))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(Self::holiday_from_row).collect()
    }

    /// Bulk-insert countries in a single transaction.
    async fn save_countries(&self, countries: &[Country]) -> Result<(), StoreError> {
        if countries.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for country in countries {
            sqlx::query(
                "INSERT OR IGNORE INTO countries
                 (code, full_name, regions, holiday_kinds, valid_from, valid_to)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&country.code)
            .bind(&country.full_name)
            .bind(encode_json(&country.regions)?)
            .bind(encode_json(&country.supported_holiday_kinds)?)
            .bind(format_date(country.valid_from))
            .bind(format_date(country.valid_to))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Bulk-insert holidays in a single transaction.
    async fn save_holidays(&self, holidays: &[Holiday]) -> Result<(), StoreError> {
        if holidays.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        for holiday in holidays {
            sqlx::query(
                "INSERT OR IGNORE INTO holidays
                 (country_code, name, date, year, kind, translated_names, notes, flags, observed_on)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&holiday.country_code)
            .bind(&holiday.name)
            .bind(format_date(holiday.date))
            .bind(holiday.date.year())
            .bind(holiday.kind.as_str())
            .bind(encode_json(&holiday.translated_names)?)
            .bind(encode_json(&holiday.notes)?)
            .bind(encode_json(&holiday.flags)?)
            .bind(holiday.observed_on.map(format_date))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| StoreError::corrupt(format!("invalid date '{}': {}", value, err)))
}

fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|err| StoreError::corrupt(err.to_string()))
}

fn decode_json<T: DeserializeOwned>(value: &str) -> Result<T, StoreError> {
    serde_json::from_str(value)
        .map_err(|err| StoreError::corrupt(format!("invalid JSON column '{}': {}", value, err)))
}
