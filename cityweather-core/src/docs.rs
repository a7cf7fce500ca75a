//! Reference text for the WeatherAPI.com forecast endpoint this tool consumes.

use crate::{model::FORECAST_DAYS, provider::weatherapi::DEFAULT_BASE_URL};

/// A titled block of the API reference.
#[derive(Debug, Clone, Copy)]
pub struct DocSection {
    pub title: &'static str,
    pub body: &'static str,
}

pub const SECTIONS: &[DocSection] = &[
    DocSection {
        title: "Overview",
        body: "Weather data is fetched in real time from WeatherAPI.com \
               (https://www.weatherapi.com/). One request is made per search.",
    },
    DocSection {
        title: "Endpoint",
        body: "GET https://api.weatherapi.com/v1/forecast.json\n\
               ?key=YOUR_API_KEY&q=City&days=3&aqi=no&alerts=no",
    },
    DocSection {
        title: "Query Parameters",
        body: "key     Your personal API key from WeatherAPI.\n\
               q       Location to search (city name, ZIP code, IP address, or lat/lon).\n\
               days    Number of forecast days (up to 3 on the free plan).\n\
               aqi     Air quality data; always \"no\" here.\n\
               alerts  Weather alerts; always \"no\" here.",
    },
    DocSection {
        title: "Rate Limits",
        body: "Free tier: 1,000,000 requests/month\n\
               Max throughput: 20 requests/sec\n\
               Format: JSON only\n\
               Air Quality Index and Alerts: paid plans",
    },
    DocSection {
        title: "Sample Request",
        body: "GET https://api.weatherapi.com/v1/forecast.json?key=YOUR_API_KEY&q=London&days=3",
    },
    DocSection {
        title: "Sample Response",
        body: r#"{
  "location": {
    "name": "London",
    "country": "United Kingdom",
    "localtime": "2025-06-21 14:00"
  },
  "current": {
    "temp_c": 22.4,
    "condition": {
      "text": "Cloudy",
      "icon": "//cdn.weatherapi.com/weather/64x64/day/119.png"
    },
    "humidity": 65,
    "wind_kph": 10.2
  },
  "forecast": {
    "forecastday": [
      {
        "date": "2025-06-21",
        "day": {
          "avgtemp_c": 19.1,
          "condition": { "text": "Sunny", "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png" }
        }
      }
    ]
  }
}"#,
    },
];

/// The full reference as printable text. `base_url` is shown when it differs
/// from the public endpoint.
pub fn render_api_docs(base_url: &str) -> String {
    let mut out = String::from("WeatherAPI Integration\n======================\n");

    for section in SECTIONS {
        out.push('\n');
        out.push_str(section.title);
        out.push('\n');
        out.push_str(&"-".repeat(section.title.len()));
        out.push('\n');
        out.push_str(section.body);
        out.push('\n');
    }

    if base_url.trim_end_matches('/') != DEFAULT_BASE_URL {
        out.push_str(&format!("\nConfigured base URL: {base_url}\n"));
    }
    out.push_str(&format!("\nForecast window used by this tool: {FORECAST_DAYS} days\n"));

    out
}
