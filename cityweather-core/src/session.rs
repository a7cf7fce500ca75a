//! Request state and the transitions that drive it.
//!
//! [`SearchSession`] is the only owner of [`RequestState`]. A caller submits
//! raw input, starts the fetch for the returned [`SearchInput`] however it
//! likes (inline or on a task), then hands the outcome back through
//! [`SearchSession::complete`].

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    model::ForecastResult,
    provider::{FetchError, WeatherProvider},
    validation::{SearchInput, ValidationError, validate_city},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(ForecastResult),
    Failure(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A lookup is already running; the new submit was dropped.
    #[error("A search is already in progress")]
    InFlight,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    state: RequestState,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Validate `raw` and move to `Loading`.
    ///
    /// While a request is in flight every submit is rejected and the state is
    /// left as is. A validation failure moves to `Failure` without any request.
    pub fn submit(&mut self, raw: &str) -> Result<SearchInput, SubmitError> {
        if self.state.is_loading() {
            warn!("Ignoring submit while a search is in progress");
            return Err(SubmitError::InFlight);
        }

        match validate_city(raw) {
            Ok(input) => {
                info!(city = %input, "Search started");
                self.state = RequestState::Loading;
                Ok(input)
            }
            Err(err) => {
                info!(reason = %err, "Search input rejected");
                self.state = RequestState::Failure(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Resolve the in-flight request. Outcomes arriving when nothing is
    /// loading are dropped.
    pub fn complete(&mut self, outcome: Result<ForecastResult, FetchError>) {
        if !self.state.is_loading() {
            warn!("Dropping fetch outcome with no search in progress");
            return;
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    location = %result.location.name,
                    days = result.days.len(),
                    "Search succeeded"
                );
                RequestState::Success(result)
            }
            Err(err) => {
                warn!(error = ?err, "Search failed");
                RequestState::Failure(err.to_string())
            }
        };
    }

    /// Submit, fetch and complete in one go.
    pub async fn search(
        &mut self,
        provider: &dyn WeatherProvider,
        raw: &str,
    ) -> Result<&RequestState, SubmitError> {
        let input = self.submit(raw)?;
        let outcome = provider.fetch_forecast(&input).await;
        self.complete(outcome);
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, CurrentConditions, Location};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_result(name: &str) -> ForecastResult {
        ForecastResult {
            location: Location {
                name: name.to_string(),
                country: "Nowhere".to_string(),
                localtime: "2025-06-21 14:00".to_string(),
            },
            current: CurrentConditions {
                temperature_c: 20.0,
                condition: Condition { text: "Sunny".into(), icon: "//icon".into() },
                humidity_pct: 50,
                wind_kph: 5.0,
            },
            days: Vec::new(),
        }
    }

    #[derive(Debug, Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn fetch_forecast(&self, input: &SearchInput) -> Result<ForecastResult, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if input.city() == "Atlantis" {
                Err(FetchError::CityNotFound { status: 400 })
            } else {
                Ok(sample_result(input.city()))
            }
        }
    }

    #[test]
    fn starts_idle() {
        assert_eq!(SearchSession::new().state(), &RequestState::Idle);
    }

    #[test]
    fn valid_submit_moves_to_loading() {
        let mut session = SearchSession::new();
        let input = session.submit(" Lo ").unwrap();
        assert_eq!(input.city(), "Lo");
        assert!(session.state().is_loading());
    }

    #[test]
    fn invalid_submit_fails_without_loading() {
        let mut session = SearchSession::new();
        let err = session.submit("L").unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ValidationError::TooShort)));
        assert_eq!(
            session.state(),
            &RequestState::Failure("Please enter at least 2 characters".into())
        );
    }

    #[test]
    fn second_submit_while_loading_is_rejected_and_first_wins() {
        let mut session = SearchSession::new();
        session.submit("Paris").unwrap();

        let err = session.submit("Berlin").unwrap_err();
        assert!(matches!(err, SubmitError::InFlight));
        assert!(session.state().is_loading());

        // An invalid submit while loading must not clobber the state either.
        assert!(matches!(session.submit("1").unwrap_err(), SubmitError::InFlight));
        assert!(session.state().is_loading());

        session.complete(Ok(sample_result("Paris")));
        match session.state() {
            RequestState::Success(r) => assert_eq!(r.location.name, "Paris"),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn not_found_becomes_failure_message() {
        let mut session = SearchSession::new();
        session.submit("Atlantis").unwrap();
        session.complete(Err(FetchError::CityNotFound { status: 404 }));
        assert_eq!(session.state(), &RequestState::Failure("City not found".into()));
    }

    #[test]
    fn task_failure_becomes_generic_message() {
        let mut session = SearchSession::new();
        session.submit("Oslo").unwrap();
        session.complete(Err(FetchError::Aborted("boom".into())));
        assert_eq!(session.state(), &RequestState::Failure("Error fetching data".into()));
    }

    #[test]
    fn new_submit_after_result_clears_it() {
        let mut session = SearchSession::new();
        session.submit("Oslo").unwrap();
        session.complete(Ok(sample_result("Oslo")));

        session.submit("Bergen").unwrap();
        assert_eq!(session.state(), &RequestState::Loading);
    }

    #[test]
    fn new_submit_after_failure_is_accepted() {
        let mut session = SearchSession::new();
        session.submit("x").unwrap_err();
        session.submit("Bergen").unwrap();
        assert_eq!(session.state(), &RequestState::Loading);
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut session = SearchSession::new();
        session.complete(Ok(sample_result("Ghost")));
        assert_eq!(session.state(), &RequestState::Idle);

        session.submit("Oslo").unwrap();
        session.complete(Ok(sample_result("Oslo")));
        session.complete(Err(FetchError::CityNotFound { status: 404 }));
        assert!(matches!(session.state(), RequestState::Success(_)));
    }

    #[tokio::test]
    async fn search_calls_provider_once_for_valid_input() {
        let provider = CountingProvider::default();
        let mut session = SearchSession::new();

        let state = session.search(&provider, "Lisbon").await.unwrap();
        assert!(matches!(state, RequestState::Success(r) if r.location.name == "Lisbon"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_skips_provider_for_invalid_input() {
        let provider = CountingProvider::default();
        let mut session = SearchSession::new();

        assert!(session.search(&provider, "L1sbon").await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            session.state(),
            &RequestState::Failure(
                "Invalid city name — only letters, spaces and hyphens are allowed".into()
            )
        );
    }

    #[tokio::test]
    async fn search_maps_provider_error() {
        let provider = CountingProvider::default();
        let mut session = SearchSession::new();

        let state = session.search(&provider, "Atlantis").await.unwrap();
        assert_eq!(state, &RequestState::Failure("City not found".into()));
    }
}
