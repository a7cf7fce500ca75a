use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of forecast days requested from, and kept out of, a provider response.
pub const FORECAST_DAYS: usize = 3;

/// Where the forecast applies, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    /// Provider-formatted local time, e.g. "2025-06-21 14:00".
    pub localtime: String,
}

/// A weather condition: human-readable text plus an icon reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon reference as returned by the provider. WeatherAPI uses
    /// protocol-relative URLs ("//cdn.weatherapi.com/...").
    pub icon: String,
}

impl Condition {
    /// Icon reference as an absolute URL.
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("//") {
            format!("https:{}", self.icon)
        } else {
            self.icon.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub condition: Condition,
    pub humidity_pct: u8,
    pub wind_kph: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub avg_temperature_c: f64,
    pub condition: Condition,
}

/// Current conditions plus up to [`FORECAST_DAYS`] daily entries, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: Location,
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}
