//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - City name validation
//! - The WeatherAPI.com forecast provider and its error mapping
//! - The search session state machine and its text rendering
//! - Configuration & credentials handling
//! - A scoped clock for live date display
//!
//! It is used by `cityweather-cli`, but can also be reused by other front ends.

pub mod clock;
pub mod config;
pub mod docs;
pub mod model;
pub mod provider;
pub mod render;
pub mod session;
pub mod validation;

pub use clock::Clock;
pub use config::Config;
pub use model::{Condition, CurrentConditions, ForecastDay, ForecastResult, Location};
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use render::{render, render_date_banner};
pub use session::{RequestState, SearchSession, SubmitError};
pub use validation::{SearchInput, ValidationError, validate_city};
