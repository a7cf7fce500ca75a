use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::{Config, ForecastResult, SearchInput, provider::weatherapi::WeatherApiProvider};

pub mod weatherapi;

/// Why a forecast lookup produced no data.
///
/// `Display` is the message shown to the user; the underlying cause is kept
/// for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-success status.
    #[error("City not found")]
    CityNotFound { status: u16 },

    /// No usable response: DNS, connect, timeout, or body read failure.
    #[error("Error fetching data")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("Error fetching data")]
    Decode(#[source] serde_json::Error),

    /// The fetch task died before producing a result.
    #[error("Error fetching data")]
    Aborted(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions and a short forecast for a validated city.
    async fn fetch_forecast(&self, input: &SearchInput) -> Result<ForecastResult, FetchError>;
}

/// Construct the WeatherAPI provider from config, resolving the API key from
/// the environment first and the config file second.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No WeatherAPI key configured.\n\
             Hint: set WEATHER_API_KEY or run `cityweather configure` and enter your API key."
        )
    })?;

    let provider = WeatherApiProvider::new(api_key, config.base_url(), config.timeout())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_collapse_to_two_kinds() {
        assert_eq!(FetchError::CityNotFound { status: 404 }.to_string(), "City not found");
        assert_eq!(FetchError::Aborted("panicked".into()).to_string(), "Error fetching data");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(FetchError::Decode(json_err).to_string(), "Error fetching data");
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default().with_env_lookup(|_| None);
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No WeatherAPI key configured"));
        assert!(err.to_string().contains("cityweather configure"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_stored() {
        let mut cfg = Config::default().with_env_lookup(|_| None);
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
