//! Interactive search loop.
//!
//! One task owns the [`SearchSession`] and multiplexes stdin, the single
//! in-flight fetch and the clock. Submits made while a fetch is running are
//! rejected by the session, so at most one fetch task ever exists.

use std::sync::Arc;

use chrono::NaiveDate;
use cityweather_core::{
    Clock, FetchError, ForecastResult, SearchSession, SubmitError, WeatherProvider,
    clock::DEFAULT_TICK, render, render_date_banner,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing::debug;

type FetchTask = JoinHandle<Result<ForecastResult, FetchError>>;

const QUIT_COMMANDS: &[&str] = &[":q", ":quit"];

pub async fn run_interactive(provider: Arc<dyn WeatherProvider>) -> anyhow::Result<()> {
    let mut session = SearchSession::new();
    let mut clock = Clock::start(DEFAULT_TICK);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<FetchTask> = None;

    let mut shown_date = clock.now().date_naive();
    println!("City Weather");
    println!("{}", render_date_banner(&shown_date));
    println!("Enter a city name (or :q to quit).");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if QUIT_COMMANDS.iter().any(|q| *q == line.trim()) {
                    break;
                }

                match session.submit(&line) {
                    Ok(input) => {
                        let provider = Arc::clone(&provider);
                        pending = Some(tokio::spawn(async move {
                            provider.fetch_forecast(&input).await
                        }));
                    }
                    Err(SubmitError::InFlight) => {
                        println!("A search is already in progress; please wait.");
                        continue;
                    }
                    Err(SubmitError::Invalid(_)) => {}
                }
                println!("{}", render(session.state()));
            }

            joined = wait_for(&mut pending) => {
                pending = None;
                let outcome = joined.unwrap_or_else(|e| Err(FetchError::Aborted(e.to_string())));
                session.complete(outcome);
                println!("{}", render(session.state()));
            }

            now = clock.tick() => {
                let today = now.date_naive();
                if roll_date(&mut shown_date, today) {
                    println!("{}", render_date_banner(&today));
                }
            }
        }
    }

    if let Some(task) = pending.take() {
        debug!("Abandoning in-flight search on exit");
        task.abort();
    }

    Ok(())
}

/// Resolves with the task result, or never if there is no task.
async fn wait_for(
    pending: &mut Option<FetchTask>,
) -> Result<Result<ForecastResult, FetchError>, tokio::task::JoinError> {
    match pending {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}

/// Record `today` and report whether the banner needs reprinting.
fn roll_date(shown: &mut NaiveDate, today: NaiveDate) -> bool {
    if *shown == today {
        return false;
    }
    *shown = today;
    true
}
