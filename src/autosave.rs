//! Self-rearming autosave timer.
//!
//! The first tick fires immediately, so the pad saves once at startup. Each
//! later deadline is set when the timer is polled again after a firing, which
//! means the period is measured from the end of the previous save.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
pub struct Autosave {
    period: Option<Duration>,
    deadline: Option<Instant>,
    fired: bool,
}

impl Autosave {
    /// `None` disables autosave; `tick` then never completes
    pub fn new(period: Option<Duration>) -> Self {
        Self {
            period,
            deadline: None,
            fired: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.period.is_some()
    }

    /// Wait for the next autosave.
    ///
    /// Cancel safe: dropping the future keeps the pending deadline.
    pub async fn tick(&mut self) {
        let Some(period) = self.period else {
            return std::future::pending().await;
        };

        let fired = self.fired;
        let deadline = *self.deadline.get_or_insert_with(|| {
            if fired {
                Instant::now() + period
            } else {
                Instant::now()
            }
        });

        tokio::time::sleep_until(deadline).await;

        self.deadline = None;
        self.fired = true;
    }
}
