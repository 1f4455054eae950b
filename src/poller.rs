use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::CycleError;
use crate::practicum::{HomeworkSource, check_response};
use crate::state_machine::{Cursor, CycleOutcome, Phase};
use crate::status::parse_status;
use crate::telegram::{ChatSender, Notifier};

/// Telegram rejects longer messages.
const MAX_MESSAGE_CHARS: usize = 4096;

/// Source of "now" for advancing the cursor.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock time in Unix seconds.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Drives the fetch → validate → map → notify cycle and the cooldown between
/// cycles.
///
/// Owns the cursor. Every [`CycleError`] is caught in [`run_cycle`](Self::run_cycle)
/// and reported through the notifier; nothing a cycle does can stop the loop.
pub struct Poller<F, S, C = SystemClock> {
    source: F,
    notifier: Notifier<S>,
    clock: C,
    cursor: Cursor,
    phase: Phase,
    retry_time: Duration,
}

impl<F: HomeworkSource, S: ChatSender, C: Clock> Poller<F, S, C> {
    /// Create a poller whose first fetch asks for everything since `cursor`.
    pub fn new(
        source: F,
        notifier: Notifier<S>,
        clock: C,
        cursor: Cursor,
        retry_time: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            clock,
            cursor,
            phase: Phase::Startup,
            retry_time,
        }
    }

    /// Poll until `shutdown` resolves. Shutdown is only observed during
    /// cooldown, so an in-flight cycle always finishes.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        loop {
            let outcome = self.run_cycle().await;
            debug!(
                ?outcome,
                secs = self.retry_time.as_secs(),
                phase = %self.phase,
                "waiting for next cycle"
            );
            tokio::select! {
                _ = sleep(self.retry_time) => {}
                _ = &mut shutdown => {
                    info!(cursor = self.cursor.get(), "shutdown requested, stopping poller");
                    break;
                }
            }
        }
    }

    /// Run one POLLING phase and leave the poller in COOLDOWN.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.phase = Phase::Polling;
        let outcome = match self.poll().await {
            Ok(0) => {
                debug!(cursor = self.cursor.get(), "no new homework statuses");
                CycleOutcome::Idle
            }
            Ok(count) => {
                info!(count, cursor = self.cursor.get(), "homework status changes relayed");
                CycleOutcome::Notified(count)
            }
            Err(e) => {
                log_cycle_error(&e, self.cursor.get());
                let message = failure_message(&e);
                self.notifier.notify(&message).await;
                CycleOutcome::Failed(message)
            }
        };
        self.phase = Phase::Cooldown;
        outcome
    }

    // The cursor only moves once every item has been handled.
    async fn poll(&mut self) -> Result<usize, CycleError> {
        let response = self.source.fetch(self.cursor.get()).await?;
        let homeworks = check_response(&response)?;
        for item in &homeworks {
            let message = parse_status(item)?;
            self.notifier.notify(&message).await;
        }
        self.cursor.advance(self.clock.now());
        Ok(homeworks.len())
    }
}

/// Chat text for a failed cycle, cut to fit a single Telegram message.
fn failure_message(e: &CycleError) -> String {
    let message = format!("Program failure: {e}");
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message;
    }
    let mut cut: String = message.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    cut.push('…');
    cut
}

fn log_cycle_error(e: &CycleError, cursor: i64) {
    match e {
        CycleError::Fetch(fetch) => {
            error!(error = %e, transient = fetch.is_transient(), cursor, "homework API request failed")
        }
        CycleError::Shape(_) => error!(error = %e, cursor, "homework API changed its response contract"),
        CycleError::UnknownStatus { status } => {
            error!(%status, cursor, "homework has an unknown review status")
        }
    }
}
