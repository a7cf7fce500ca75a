use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    model::{Condition, CurrentConditions, FORECAST_DAYS, ForecastDay, ForecastResult, Location},
    provider::FetchError,
    validation::SearchInput,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip_all, fields(city = %input))]
    async fn fetch_forecast(&self, input: &SearchInput) -> Result<ForecastResult, FetchError> {
        let url = self.forecast_url();
        let days = FORECAST_DAYS.to_string();
        debug!(url = %url, "Requesting WeatherAPI forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", input.city()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = res.status();

        if !status.is_success() {
            // Body is only for the log; an unreadable one doesn't change the outcome.
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_body(&body), "WeatherAPI forecast request failed");
            return Err(FetchError::CityNotFound { status: status.as_u16() });
        }

        let body = res.text().await.map_err(FetchError::Transport)?;

        let parsed: WaForecastResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse WeatherAPI forecast JSON");
            FetchError::Decode(e)
        })?;

        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
    humidity: u8,
    wind_kph: f64,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon }
    }
}

impl From<WaForecastResponse> for ForecastResult {
    fn from(r: WaForecastResponse) -> Self {
        let days = r
            .forecast
            .forecastday
            .into_iter()
            .take(FORECAST_DAYS)
            .map(|d| ForecastDay {
                date: d.date,
                avg_temperature_c: d.day.avgtemp_c,
                condition: d.day.condition.into(),
            })
            .collect();

        ForecastResult {
            location: Location {
                name: r.location.name,
                country: r.location.country,
                localtime: r.location.localtime,
            },
            current: CurrentConditions {
                temperature_c: r.current.temp_c,
                condition: r.current.condition.into(),
                humidity_pct: r.current.humidity,
                wind_kph: r.current.wind_kph,
            },
            days,
        }
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
