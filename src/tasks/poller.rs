use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};

use crate::core::metrics::{NOTIFICATIONS_TOTAL, POLLS_TOTAL, POLL_FAILURES_TOTAL};
use crate::core::time::unix_now;
use crate::services::homework::{self, HomeworkError};
use crate::services::practicum::{HomeworkApi, PracticumError};
use crate::services::telegram_bot::{DeliveryError, Notifier};

const FAILURE_PREFIX: &str = "Сбой в работе программы";

#[derive(Debug, Error)]
pub(crate) enum CycleError {
    #[error(transparent)]
    Practicum(#[from] PracticumError),
    #[error(transparent)]
    Homework(#[from] HomeworkError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    NoHomeworks,
    Unchanged,
    Notified,
}

/// Polls the homework API and announces status changes of the latest submission.
pub(crate) struct Poller<A, N> {
    api: A,
    notifier: N,
    retry_period: Duration,
    previous_status: Option<String>,
    last_reported_error: Option<String>,
}

impl<A: HomeworkApi, N: Notifier> Poller<A, N> {
    pub(crate) fn new(api: A, notifier: N, retry_period: Duration) -> Self {
        Self { api, notifier, retry_period, previous_status: None, last_reported_error: None }
    }

    /// Runs cycles until `shutdown` flips. Every cycle is followed by the retry sleep.
    pub(crate) async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }

            self.tick(unix_now()).await;

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = sleep(self.retry_period) => {}
            }
        }
    }

    /// One cycle with every error handled at this boundary.
    pub(crate) async fn tick(&mut self, timestamp: i64) {
        metrics::counter!(POLLS_TOTAL).increment(1);

        match self.run_cycle(timestamp).await {
            Ok(outcome) => {
                self.last_reported_error = None;
                if outcome == CycleOutcome::Notified {
                    metrics::counter!(NOTIFICATIONS_TOTAL).increment(1);
                }
            }
            Err(error) => {
                metrics::counter!(POLL_FAILURES_TOTAL).increment(1);
                self.report_failure(&error).await;
            }
        }
    }

    pub(crate) async fn run_cycle(&mut self, timestamp: i64) -> Result<CycleOutcome, CycleError> {
        let answer = self.api.get_api_answer(timestamp).await?;
        let homeworks = homework::check_response(&answer)?;

        let Some(latest) = homeworks.first() else {
            tracing::debug!(from_date = timestamp, "No homework updates since last poll");
            return Ok(CycleOutcome::NoHomeworks);
        };

        let status = homework::record_status(latest)?;
        if self.previous_status.as_deref() == Some(status) {
            tracing::debug!(status, "Homework status unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        // Stored before formatting and delivery, so a failed cycle is not retried.
        let previous = self.previous_status.replace(status.to_string());

        let message = homework::parse_status(latest)?;
        self.notifier.send_message(&message).await?;
        tracing::info!(
            previous = previous.as_deref().unwrap_or("<none>"),
            status,
            "Homework status change announced"
        );

        Ok(CycleOutcome::Notified)
    }

    async fn report_failure(&mut self, error: &CycleError) {
        tracing::error!(error = %error, "Homework poll cycle failed");

        // The notifier already logged it; reporting through it again would fail the same way.
        if matches!(error, CycleError::Delivery(_)) {
            return;
        }

        let message = format!("{FAILURE_PREFIX}: {error}");
        if self.last_reported_error.as_deref() == Some(message.as_str()) {
            tracing::debug!("Same failure already reported, notification skipped");
            return;
        }

        if self.notifier.send_message(&message).await.is_ok() {
            self.last_reported_error = Some(message);
        }
    }
}
