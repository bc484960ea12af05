//! In-memory holiday store.
//!
//! `InMemoryHolidayStore` keeps countries keyed by code and holidays keyed by
//! `(country, date, name, kind)` in ordered maps, so lookups come back in the
//! same order the SQLite repository returns them. Inserting a key that is
//! already present keeps the first value.
//!
//! The maps live behind a `tokio::sync::RwLock`; no lock is held across an
//! await outside this module.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::holidays::{
    error::StoreError,
    store::{HolidayQuery, HolidayStore},
    types::{Country, Holiday, HolidayKind},
};

type HolidayKey = (String, NaiveDate, String, HolidayKind);

#[derive(Debug, Default)]
struct Tables {
    countries: BTreeMap<String, Country>,
    holidays: BTreeMap<HolidayKey, Holiday>,
}

/// Process-local `HolidayStore`. Never fails.
#[derive(Debug, Default)]
pub struct InMemoryHolidayStore {
    tables: RwLock<Tables>,
}

impl InMemoryHolidayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored holidays across all countries.
    pub async fn holiday_count(&self) -> usize {
        self.tables.read().await.holidays.len()
    }
}

fn holiday_key(holiday: &Holiday) -> HolidayKey {
    (
        holiday.country_code.clone(),
        holiday.date,
        holiday.name.clone(),
        holiday.kind.clone(),
    )
}

#[async_trait]
impl HolidayStore for InMemoryHolidayStore {
    async fn find_countries(&self) -> Result<Vec<Country>, StoreError> {
        Ok(self.tables.read().await.countries.values().cloned().collect())
    }

    async fn find_holidays(
        &self,
        country_code: &str,
        query: HolidayQuery,
    ) -> Result<Vec<Holiday>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .holidays
            .values()
            .filter(|h| h.country_code == country_code && query.matches(h.date))
            .cloned()
            .collect())
    }

    async fn save_countries(&self, countries: &[Country]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        for country in countries {
            tables
                .countries
                .entry(country.code.clone())
                .or_insert_with(|| country.clone());
        }
        Ok(())
    }

    async fn save_holidays(&self, holidays: &[Holiday]) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        for holiday in holidays {
            tables
                .holidays
                .entry(holiday_key(holiday))
                .or_insert_with(|| holiday.clone());
        }
        Ok(())
    }
}
