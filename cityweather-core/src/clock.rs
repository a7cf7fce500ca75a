//! Periodic wall-clock publisher.
//!
//! The ticking task lives exactly as long as its [`Clock`]: dropping the
//! handle aborts it and closes the channel it publishes on.

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::trace;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Clock {
    rx: watch::Receiver<DateTime<Local>>,
    task: JoinHandle<()>,
}

impl Clock {
    /// Spawn the ticking task on the current Tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = watch::channel(Local::now());

        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let now = Local::now();
                trace!(%now, "clock tick");
                if tx.send(now).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    pub fn now(&self) -> DateTime<Local> {
        *self.rx.borrow()
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) -> DateTime<Local> {
        if self.rx.changed().await.is_err() {
            // Ticker task is gone; never resolve rather than spin.
            std::future::pending::<()>().await;
        }
        *self.rx.borrow_and_update()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.task.abort();
    }
}
