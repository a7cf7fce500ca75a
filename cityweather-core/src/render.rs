//! Text projection of a [`RequestState`]. Nothing here mutates state.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

use crate::{
    model::{ForecastDay, ForecastResult},
    session::RequestState,
};

pub const LOADING_TEXT: &str = "Loading...";

pub fn render(state: &RequestState) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Loading => LOADING_TEXT.to_string(),
        RequestState::Success(result) => render_forecast(result),
        RequestState::Failure(message) => message.clone(),
    }
}

/// Long-form date shown above the search prompt, e.g. "Saturday, June 21, 2025".
pub fn render_date_banner<D: Datelike>(date: &D) -> String {
    match NaiveDate::from_ymd_opt(date.year(), date.month(), date.day()) {
        Some(d) => d.format("%A, %B %-d, %Y").to_string(),
        None => String::new(),
    }
}

fn render_forecast(result: &ForecastResult) -> String {
    let mut out = String::new();
    let current = &result.current;

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "{}, {}", result.location.name, result.location.country);
    let _ = writeln!(out, "Local time: {}", result.location.localtime);
    let _ = writeln!(out, "Icon: {}", current.condition.icon_url());
    let _ = writeln!(out, "{}°C", current.temperature_c);
    let _ = writeln!(out, "{}", current.condition.text);
    let _ = writeln!(out, "Humidity: {}%   Wind: {} kph", current.humidity_pct, current.wind_kph);

    if !result.days.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}-Day Forecast", result.days.len());
        for day in &result.days {
            let _ = writeln!(out, "{}", render_day(day));
        }
    }

    out.truncate(out.trim_end().len());
    out
}

fn render_day(day: &ForecastDay) -> String {
    format!(
        "{:<12}{:>8}  {:<24}{}",
        day.date.format("%a, %b %-d").to_string(),
        format!("{}°C", day.avg_temperature_c),
        day.condition.text,
        day.condition.icon_url(),
    )
}
