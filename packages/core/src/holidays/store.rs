//! Holiday Store Interface
//!
//! Local persistence for countries and holidays. The resolver treats a
//! populated store as authoritative and only consults the provider on an
//! empty result.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::holidays::{
    error::StoreError,
    types::{Country, Holiday},
};

/// Filter for holiday lookups within one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayQuery {
    /// All holidays whose date falls in the calendar year.
    Year(i32),
    /// Holidays on exactly this date.
    Date(NaiveDate),
}

impl HolidayQuery {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            HolidayQuery::Year(year) => date.year() == *year,
            HolidayQuery::Date(exact) => date == *exact,
        }
    }
}

/// Persistent collection of countries and holidays.
///
/// Saves are idempotent: a record that already exists (countries by code,
/// holidays by country, date, name and kind) is left as is. Concurrent
/// duplicate saves must not produce duplicate visible results.
#[async_trait]
pub trait HolidayStore {
    /// All stored countries, ordered by code.
    async fn find_countries(&self) -> Result<Vec<Country>, StoreError>;

    /// Holidays of `country_code` matching `query`, ordered by date, then name, then kind.
    async fn find_holidays(
        &self,
        country_code: &str,
        query: HolidayQuery,
    ) -> Result<Vec<Holiday>, StoreError>;

    async fn save_countries(&self, countries: &[Country]) -> Result<(), StoreError>;

    async fn save_holidays(&self, holidays: &[Holiday]) -> Result<(), StoreError>;
}
