//! Kayaposoft Holiday Provider Adapter
//!
//! Adapts the KayaposoftClient to implement the HolidayProvider trait

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::holidays::{
    error::ProviderError,
    provider::{HolidayProvider, ProviderResult},
    types::{Country, Holiday, HolidayKind, LocalizedText},
};
use crate::services::kayaposoft::{ApiCountry, ApiDate, ApiHoliday, ApiText, KayaposoftClient};

/// Adapter that implements HolidayProvider for KayaposoftClient
pub struct KayaposoftHolidayProvider {
    client: KayaposoftClient,
}

impl KayaposoftHolidayProvider {
    pub fn new(client: KayaposoftClient) -> Self {
        Self { client }
    }

    fn convert_country(&self, country: ApiCountry) -> ProviderResult<Country> {
        Ok(Country {
            valid_from: to_date(&country.from_date)?,
            valid_to: to_date(&country.to_date)?,
            code: country.country_code,
            full_name: country.full_name,
            regions: country.regions.unwrap_or_default(),
            supported_holiday_kinds: country
                .holiday_types
                .unwrap_or_default()
                .into_iter()
                .map(HolidayKind::new)
                .collect(),
        })
    }

    fn convert_holiday(&self, country_code: &str, holiday: ApiHoliday) -> ProviderResult<Holiday> {
        let date = to_date(&holiday.date)?;
        let observed_on = holiday.observed_on.as_ref().map(to_date).transpose()?;
        let kind = HolidayKind::new(holiday.holiday_type);
        let translated_names = to_texts(holiday.name);

        Ok(Holiday {
            country_code: country_code.to_string(),
            name: display_name(&translated_names, &kind),
            translated_names,
            date,
            kind,
            notes: to_texts(holiday.note),
            flags: holiday.flags.unwrap_or_default().into_iter().collect(),
            observed_on,
        })
    }
}

fn to_date(date: &ApiDate) -> ProviderResult<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year, date.month, date.day).ok_or_else(|| {
        ProviderError::deserialization(format!(
            "Invalid calendar date {}-{}-{}",
            date.year, date.month, date.day
        ))
    })
}

fn to_texts(texts: Option<Vec<ApiText>>) -> Vec<LocalizedText> {
    texts
        .unwrap_or_default()
        .into_iter()
        .map(|t| LocalizedText::new(t.lang, t.text))
        .collect()
}

/// English name if present, else the first translation, else the kind tag.
fn display_name(names: &[LocalizedText], kind: &HolidayKind) -> String {
    names
        .iter()
        .find(|n| n.lang == "en")
        .or_else(|| names.first())
        .map(|n| n.text.clone())
        .unwrap_or_else(|| kind.to_string())
}

impl From<AppError> for ProviderError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Upstream(message) => ProviderError::Upstream { message },
            AppError::Parse(message) => ProviderError::Deserialization { message },
            other => ProviderError::Transport {
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl HolidayProvider for KayaposoftHolidayProvider {
    async fn fetch_countries(&self) -> ProviderResult<Vec<Country>> {
        let countries = self.client.fetch_supported_countries().await?;
        countries
            .into_iter()
            .map(|country| self.convert_country(country))
            .collect()
    }

    async fn fetch_holidays_for_year(
        &self,
        country_code: &str,
        year: i32,
    ) -> ProviderResult<Vec<Holiday>> {
        let holidays = self
            .client
            .fetch_holidays_for_year(country_code, year)
            .await?;

        let holidays: Vec<Holiday> = holidays
            .into_iter()
            .map(|holiday| self.convert_holiday(country_code, holiday))
            .collect::<ProviderResult<_>>()?;

        tracing::debug!(
            country_code,
            year,
            count = holidays.len(),
            "Fetched holidays from {}",
            self.provider_name()
        );
        Ok(holidays)
    }

    fn provider_name(&self) -> &str {
        "Kayaposoft"
    }
}
