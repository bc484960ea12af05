//! Holiday Data Provider Interface
//!
//! Provides abstraction layer for external holiday data sources

use async_trait::async_trait;

use crate::holidays::{
    error::ProviderError,
    types::{Country, Holiday},
};

/// Trait for holiday data providers to ensure data source independence
#[async_trait]
pub trait HolidayProvider {
    /// Fetch every country the provider supports
    async fn fetch_countries(&self) -> Result<Vec<Country>, ProviderError>;

    /// Fetch all holidays of a country for one calendar year
    async fn fetch_holidays_for_year(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<Holiday>, ProviderError>;

    /// Get the name of this provider for logging/debugging
    fn provider_name(&self) -> &str;
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
