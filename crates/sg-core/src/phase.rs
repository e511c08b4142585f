//! Sequencer phase tracking.
//!
//! The phase is transient, in-memory state: it exists to make transition
//! logs unambiguous and dies with the process (or with the handoff).

use std::fmt;

/// Phase of the startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Probing the store until it is reachable
    Waiting,
    /// Applying pending migration units
    Migrating,
    /// Replacing the process image with the service executable
    HandingOff,
    /// A fatal error occurred; the process exits non-zero
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Waiting => "waiting",
            Phase::Migrating => "migrating",
            Phase::HandingOff => "handing-off",
            Phase::Failed => "failed",
        };
        f.write_str(s)
    }
}
