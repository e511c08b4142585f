//! Backoff waiter: gate the sequence on store availability.

use log::{info, warn};
use sg_core::Settings;
use sg_db::Store;
use std::time::{Duration, Instant};

use crate::sequencer::SequenceError;

/// Log every failed attempt up to this many.
const LOG_EVERY_ATTEMPT_UP_TO: u64 = 10;
/// After the initial burst, log every Nth failed attempt.
const LOG_EVERY_NTH: u64 = 10;

/// Retry bounds and cadence for the wait loop.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    /// Fixed delay between probe attempts
    pub interval: Duration,

    /// Give up after this many attempts; `None` retries forever
    pub max_attempts: Option<u64>,

    /// Give up after this much wall-clock time; `None` retries forever
    pub max_wait: Option<Duration>,
}

impl WaitPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.probe_interval,
            max_attempts: settings.max_attempts,
            max_wait: settings.max_wait,
        }
    }

    fn exhausted(&self, attempts: u64, started: Instant) -> bool {
        if let Some(max) = self.max_attempts {
            if attempts >= max {
                return true;
            }
        }
        if let Some(max) = self.max_wait {
            if started.elapsed() >= max {
                return true;
            }
        }
        false
    }
}

/// Probe the store until it is reachable or the policy is exhausted.
///
/// Strictly sequential: one probe, a fixed sleep, repeat. Deliberately blocks
/// the whole sequence; nothing may proceed before the store is up. Returns
/// the number of attempts made.
pub async fn wait_until_ready<S: Store + ?Sized>(
    store: &S,
    policy: &WaitPolicy,
) -> Result<u64, SequenceError> {
    let started = Instant::now();
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        match store.probe().await {
            Ok(()) => {
                info!(
                    "{} reachable after {} attempt(s) in {:.1?}",
                    store.store_type(),
                    attempts,
                    started.elapsed()
                );
                return Ok(attempts);
            }
            Err(cause) => {
                if should_log(attempts) {
                    warn!("store not ready (attempt {attempts}): {cause}");
                }
            }
        }

        if policy.exhausted(attempts, started) {
            return Err(SequenceError::WaitTimeout {
                attempts,
                elapsed: started.elapsed(),
            });
        }

        tokio::time::sleep(policy.interval).await;
    }
}

fn should_log(attempt: u64) -> bool {
    attempt <= LOG_EVERY_ATTEMPT_UP_TO || attempt % LOG_EVERY_NTH == 0
}

#[cfg(test)]
#[path = "waiter_test.rs"]
mod tests;
