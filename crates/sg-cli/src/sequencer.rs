//! The startup sequencer state machine.
//!
//! `Waiting -> Migrating -> HandingOff`, each phase a hard prerequisite for
//! the next. Any fatal error short-circuits to `Failed`; the process then
//! exits non-zero with the cause on stderr. There are no retries above the
//! waiter: migration and handoff failures are deterministic and need an
//! operator.

use log::info;
use sg_core::{MigrationUnit, Phase};
use sg_db::{apply_pending, ApplyError, Store};
use std::time::Duration;
use thiserror::Error;

use crate::handoff::{Handover, Launcher};
use crate::waiter::{self, WaitPolicy};

/// Fatal sequencing errors
#[derive(Error, Debug)]
pub enum SequenceError {
    /// Q001: The store never became reachable within the configured bound
    #[error("[Q001] Store never became available: gave up after {attempts} attempt(s) over {elapsed:.1?}")]
    WaitTimeout { attempts: u64, elapsed: Duration },

    /// Q002: The schema could not be brought to the required state
    #[error("[Q002] {0}")]
    Migration(#[from] ApplyError),

    /// Q003: The service executable could not replace this process
    #[error("[Q003] Handoff to '{command}' failed: {cause}")]
    Handoff { command: String, cause: String },

    /// Q004: Terminated by signal while waiting for the store
    #[error("[Q004] Received termination signal while waiting for the store")]
    Interrupted,
}

/// Drives the startup phases in order against a store and a launcher.
pub struct Sequencer<'a, S: Store + ?Sized> {
    store: &'a S,
    units: &'a [MigrationUnit],
    policy: WaitPolicy,
    phase: Phase,
}

impl<'a, S: Store + ?Sized> Sequencer<'a, S> {
    pub fn new(store: &'a S, units: &'a [MigrationUnit], policy: WaitPolicy) -> Self {
        Self {
            store,
            units,
            policy,
            phase: Phase::Waiting,
        }
    }

    /// Current phase, for logs and assertions.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        info!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Waiting phase: block until the store is reachable.
    ///
    /// The wait loop races against SIGTERM/SIGINT so the sleep between
    /// attempts never swallows a termination request.
    pub async fn wait(&mut self) -> Result<u64, SequenceError> {
        let result = tokio::select! {
            res = waiter::wait_until_ready(self.store, &self.policy) => res,
            _ = shutdown_signal() => Err(SequenceError::Interrupted),
        };
        if result.is_err() {
            self.enter(Phase::Failed);
        }
        result
    }

    /// Migrating phase: apply pending units in order.
    pub async fn migrate(&mut self) -> Result<usize, SequenceError> {
        self.enter(Phase::Migrating);
        match apply_pending(self.store, self.units).await {
            Ok(applied) => Ok(applied),
            Err(e) => {
                self.enter(Phase::Failed);
                Err(SequenceError::Migration(e))
            }
        }
    }

    /// Run the whole sequence and hand control to the launcher.
    ///
    /// With the production launcher this returns only on failure; the `Ok`
    /// arm exists for launchers that do not replace the process.
    pub async fn run<L: Launcher>(
        &mut self,
        launcher: &L,
        command: &[String],
    ) -> Result<Handover, SequenceError> {
        self.wait().await?;
        let applied = self.migrate().await?;
        info!("migrations complete ({applied} applied), handing off");

        self.enter(Phase::HandingOff);
        match launcher.launch(command) {
            Ok(handover) => Ok(handover),
            Err(cause) => {
                self.enter(Phase::Failed);
                Err(SequenceError::Handoff {
                    command: command.join(" "),
                    cause: cause.to_string(),
                })
            }
        }
    }
}

/// Resolve when a termination signal arrives.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = term.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod tests;
