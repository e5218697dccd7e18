//! Timer identities and the host-owned sequence that hands them out

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a timer instance.
///
/// Only ever compared against the host's active token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic generator of timer identities, owned by the host
#[derive(Debug)]
pub struct TimerIdSequence {
    next: u64,
}

impl TimerIdSequence {
    /// Create a sequence whose first identity is 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next unused identity
    pub fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next);
        self.next += 1;
        id
    }
}

impl Default for TimerIdSequence {
    fn default() -> Self {
        Self::new()
    }
}
