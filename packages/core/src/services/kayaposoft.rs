use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// Public Kayaposoft Enrico endpoint.
pub const DEFAULT_BASE_URL: &str = "https://kayaposoft.com/enrico";

#[derive(Clone)]
pub struct KayaposoftClient {
    base_url: String,
    http: Client,
}

impl KayaposoftClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/json/v2.0/", self.base_url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiText {
    pub lang: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCountry {
    pub country_code: String,
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    #[serde(default)]
    pub holiday_types: Option<Vec<String>>,
    pub full_name: String,
    pub from_date: ApiDate,
    pub to_date: ApiDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHoliday {
    pub date: ApiDate,
    #[serde(default)]
    pub name: Option<Vec<ApiText>>,
    #[serde(default)]
    pub note: Option<Vec<ApiText>>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    pub holiday_type: String,
    #[serde(default)]
    pub observed_on: Option<ApiDate>,
}

impl KayaposoftClient {
    pub async fn fetch_supported_countries(&self) -> Result<Vec<ApiCountry>, AppError> {
        self.get_json(&[("action", "getSupportedCountries")]).await
    }

    pub async fn fetch_holidays_for_year(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<ApiHoliday>, AppError> {
        let year = year.to_string();
        self.get_json(&[
            ("action", "getHolidaysForYear"),
            ("year", year.as_str()),
            ("country", country_code),
        ])
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T, AppError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(query)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Kayaposoft returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|err| AppError::Parse(err.to_string()))?;

        // Enrico reports logical failures as `{"error": "..."}` with HTTP 200.
        if let Some(message) = body.get("error") {
            let message = message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| message.to_string());
            return Err(AppError::Upstream(message));
        }

        serde_json::from_value(body).map_err(|err| AppError::Parse(err.to_string()))
    }
}
