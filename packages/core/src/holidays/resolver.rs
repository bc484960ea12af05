//! Holiday Resolver - cache-aside orchestration between store and provider

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::holidays::{
    classifier::DayClassifier,
    error::{ProviderError, ResolverError},
    provider::HolidayProvider,
    store::{HolidayQuery, HolidayStore},
    streak::StreakCalculator,
    types::{Country, DayStatus, Holiday, MonthHolidays},
};
use crate::metrics::AppMetrics;

/// Answers country and holiday questions from the local store, falling back
/// to the provider on an empty store result and persisting what it fetched.
///
/// There is no expiry: once a country list or a country's year is stored it
/// is served from the store forever. Concurrent misses on the same key are
/// not collapsed, so both requests hit the provider and both persist; stores
/// absorb the duplicate save.
#[derive(Clone)]
pub struct HolidayResolver {
    store: Arc<dyn HolidayStore + Send + Sync>,
    provider: Arc<dyn HolidayProvider + Send + Sync>,
    classifier: DayClassifier,
    streaks: StreakCalculator,
    metrics: Option<Arc<AppMetrics>>,
}

impl HolidayResolver {
    pub fn new(
        store: Arc<dyn HolidayStore + Send + Sync>,
        provider: Arc<dyn HolidayProvider + Send + Sync>,
    ) -> Self {
        Self {
            store,
            provider,
            classifier: DayClassifier::new(),
            streaks: StreakCalculator::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// All supported countries.
    ///
    /// Unlike holiday lookups, a provider failure here is surfaced: there is
    /// no meaningful "no countries" fallback.
    pub async fn get_countries(&self) -> Result<Vec<Country>, ResolverError> {
        let countries = self.store.find_countries().await?;
        if !countries.is_empty() {
            tracing::debug!(count = countries.len(), "Countries served from store");
            self.record_store_hit();
            return Ok(countries);
        }

        tracing::info!(
            provider = self.provider.provider_name(),
            "Country store empty, fetching from provider"
        );
        self.record_provider_fetch();
        let mut countries = self.provider.fetch_countries().await.map_err(|err| {
            self.record_provider_error(&err);
            tracing::warn!(kind = err.kind(), "Failed to fetch countries from provider: {}", err);
            err
        })?;
        sort_countries(&mut countries);

        if !countries.is_empty() {
            if let Err(err) = self.store.save_countries(&countries).await {
                self.record_persist_error();
                tracing::warn!("Failed to persist {} countries: {}", countries.len(), err);
            }
        }

        Ok(countries)
    }

    /// Holidays of `country_code` in `year`.
    ///
    /// Provider failures of any kind degrade to an empty list.
    pub async fn get_holidays_for_year(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<Holiday>, ResolverError> {
        validate_country_code(country_code)?;
        validate_year(year)?;

        let holidays = self
            .store
            .find_holidays(country_code, HolidayQuery::Year(year))
            .await?;
        if !holidays.is_empty() {
            tracing::debug!(country_code, year, count = holidays.len(), "Holidays served from store");
            self.record_store_hit();
            return Ok(holidays);
        }

        Ok(self.fetch_and_persist_year(country_code, year).await)
    }

    /// Holidays of `country_code` falling exactly on `date`.
    ///
    /// On a store miss the whole year is fetched (and persisted) so that
    /// later lookups in the same year are served locally.
    pub async fn get_holidays_for_date(
        &self,
        country_code: &str,
        date: NaiveDate,
    ) -> Result<Vec<Holiday>, ResolverError> {
        validate_country_code(country_code)?;

        let holidays = self
            .store
            .find_holidays(country_code, HolidayQuery::Date(date))
            .await?;
        if !holidays.is_empty() {
            tracing::debug!(country_code, %date, count = holidays.len(), "Holidays served from store");
            self.record_store_hit();
            return Ok(holidays);
        }

        let year = self.get_holidays_for_year(country_code, date.year()).await?;
        Ok(year.into_iter().filter(|holiday| holiday.date == date).collect())
    }

    /// The year's holidays grouped by month, months ascending. Months
    /// without holidays are omitted.
    pub async fn get_holidays_by_month(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<MonthHolidays>, ResolverError> {
        let holidays = self.get_holidays_for_year(country_code, year).await?;
        Ok(group_by_month(holidays))
    }

    pub async fn is_public_holiday(
        &self,
        country_code: &str,
        date: NaiveDate,
    ) -> Result<bool, ResolverError> {
        let holidays = self.get_holidays_for_date(country_code, date).await?;
        Ok(self.classifier.is_public_holiday(&holidays, date))
    }

    pub async fn is_work_day(
        &self,
        country_code: &str,
        date: NaiveDate,
    ) -> Result<bool, ResolverError> {
        let holidays = self.get_holidays_for_date(country_code, date).await?;
        Ok(self.classifier.is_work_day(&holidays, date))
    }

    pub async fn get_specific_day_status(
        &self,
        country_code: &str,
        date: NaiveDate,
    ) -> Result<DayStatus, ResolverError> {
        let holidays = self.get_holidays_for_date(country_code, date).await?;
        Ok(self.classifier.classify(&holidays, date))
    }

    pub async fn get_max_consecutive_free_days(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<u32, ResolverError> {
        let holidays = self.get_holidays_for_year(country_code, year).await?;
        Ok(self.streaks.max_consecutive_free_days(&holidays, year))
    }

    /// Provider fallback for a (country, year) miss. Never fails: provider
    /// errors yield an empty list, persist errors are logged and the fetched
    /// data is still returned.
    async fn fetch_and_persist_year(&self, country_code: &str, year: i32) -> Vec<Holiday> {
        tracing::info!(
            country_code,
            year,
            provider = self.provider.provider_name(),
            "Holiday store miss, fetching from provider"
        );
        self.record_provider_fetch();

        let mut holidays = match self.provider.fetch_holidays_for_year(country_code, year).await {
            Ok(holidays) => holidays,
            Err(err) => {
                self.record_provider_error(&err);
                tracing::warn!(
                    country_code,
                    year,
                    kind = err.kind(),
                    "Provider returned no holiday data: {}",
                    err
                );
                return Vec::new();
            }
        };

        if holidays.is_empty() {
            return holidays;
        }
        sort_holidays(&mut holidays);

        if let Err(err) = self.store.save_holidays(&holidays).await {
            self.record_persist_error();
            tracing::warn!(
                country_code,
                year,
                "Failed to persist {} holidays: {}",
                holidays.len(),
                err
            );
        }

        holidays
    }

    fn record_store_hit(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.store_hits_total.inc();
        }
    }

    fn record_provider_fetch(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.provider_fetches_total.inc();
        }
    }

    fn record_provider_error(&self, err: &ProviderError) {
        if let Some(metrics) = &self.metrics {
            metrics
                .provider_errors_total
                .with_label_values(&[err.kind()])
                .inc();
        }
    }

    fn record_persist_error(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.persist_errors_total.inc();
        }
    }
}

fn validate_country_code(country_code: &str) -> Result<(), ResolverError> {
    if country_code.trim().is_empty() {
        return Err(ResolverError::invalid_input("Country code must not be empty"));
    }
    Ok(())
}

fn validate_year(year: i32) -> Result<(), ResolverError> {
    if NaiveDate::from_ymd_opt(year, 1, 1).is_none() || NaiveDate::from_ymd_opt(year, 12, 31).is_none() {
        return Err(ResolverError::invalid_input(format!("Year {} is out of range", year)));
    }
    Ok(())
}

/// Put provider data in [`HolidayStore`] order, keeping the first of any
/// duplicates, so a fallback answer matches the store hit that follows it.
fn sort_countries(countries: &mut Vec<Country>) {
    countries.sort_by(|a, b| a.code.cmp(&b.code));
    countries.dedup_by(|later, earlier| later.code == earlier.code);
}

fn sort_holidays(holidays: &mut Vec<Holiday>) {
    holidays.sort_by(|a, b| (a.date, &a.name, &a.kind).cmp(&(b.date, &b.name, &b.kind)));
    holidays.dedup_by(|later, earlier| {
        later.date == earlier.date && later.name == earlier.name && later.kind == earlier.kind
    });
}

fn group_by_month(holidays: Vec<Holiday>) -> Vec<MonthHolidays> {
    let mut months: BTreeMap<u32, Vec<Holiday>> = BTreeMap::new();
    for holiday in holidays {
        months.entry(holiday.date.month()).or_default().push(holiday);
    }
    months
        .into_iter()
        .map(|(month, holidays)| MonthHolidays { month, holidays })
        .collect()
}
