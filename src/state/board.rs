//! The board: host of all timers and sole owner of the active token and the
//! pause flag

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::timer::{HostView, Orientation, TimerController, TimerId, TimerIdSequence, TimerSnapshot};

/// Serializable view of the whole board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub active: Option<TimerId>,
    pub paused: bool,
    pub timers: Vec<TimerSnapshot>,
}

/// Host of a set of timers.
///
/// Exclusivity of the running timer comes from `active` holding at most one
/// identity; every mutation ends with all timers being reconciled against it.
#[derive(Debug)]
pub struct Board {
    ids: TimerIdSequence,
    timers: BTreeMap<TimerId, TimerController>,
    active: Option<TimerId>,
    paused: bool,
    requests_tx: UnboundedSender<TimerId>,
    requests_rx: UnboundedReceiver<TimerId>,
}

impl Board {
    /// Create an empty, unpaused board with no active timer
    pub fn new() -> Self {
        let (requests_tx, requests_rx) = unbounded_channel();
        Self {
            ids: TimerIdSequence::new(),
            timers: BTreeMap::new(),
            active: None,
            paused: false,
            requests_tx,
            requests_rx,
        }
    }

    /// Create a board with `count` timers of `initial_seconds` each
    pub fn with_timers(count: usize, initial_seconds: u64) -> Self {
        let mut board = Self::new();
        for _ in 0..count {
            board.add_timer(initial_seconds);
        }
        board
    }

    pub fn view(&self) -> HostView {
        HostView {
            active: self.active,
            paused: self.paused,
        }
    }

    pub fn active(&self) -> Option<TimerId> {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn timer(&self, id: TimerId) -> Option<&TimerController> {
        self.timers.get(&id)
    }

    /// Add a new stopped timer and return its identity
    pub fn add_timer(&mut self, initial_seconds: u64) -> TimerId {
        let id = self.ids.next_id();
        let mut timer = TimerController::new(id, initial_seconds, self.requests_tx.clone());
        timer.reconcile(self.view());
        self.timers.insert(id, timer);

        info!("Added timer {} with {}s", id, initial_seconds);
        id
    }

    /// Remove a timer, releasing its ticker. Clears the active token if it
    /// named this timer.
    pub fn remove_timer(&mut self, id: TimerId) -> bool {
        if self.timers.remove(&id).is_none() {
            return false;
        }

        if self.active == Some(id) {
            self.active = None;
        }
        info!("Removed timer {}", id);
        true
    }

    /// Forward a user press to the timer, then settle its activation request
    pub fn press(&mut self, id: TimerId) -> bool {
        let Some(timer) = self.timers.get_mut(&id) else {
            return false;
        };

        timer.on_activation_requested();
        self.process_requests();
        true
    }

    /// Apply queued activation requests, last one wins
    pub fn process_requests(&mut self) {
        while let Ok(id) = self.requests_rx.try_recv() {
            if self.timers.contains_key(&id) {
                if self.active != Some(id) {
                    info!("Active timer changed: {:?} -> {}", self.active, id);
                }
                self.active = Some(id);
            } else {
                warn!("Ignoring activation request from unknown timer {}", id);
            }
        }
        self.reconcile_all();
    }

    /// Set the active token directly. Unknown identities are rejected.
    pub fn set_active(&mut self, active: Option<TimerId>) -> bool {
        if let Some(id) = active {
            if !self.timers.contains_key(&id) {
                return false;
            }
        }

        info!("Active timer set to {:?}", active);
        self.active = active;
        self.reconcile_all();
        true
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!("Board {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
        self.reconcile_all();
    }

    /// Supply a new starting value to one timer
    pub fn reconfigure(&mut self, id: TimerId, initial_seconds: u64) -> bool {
        let Some(timer) = self.timers.get_mut(&id) else {
            return false;
        };

        timer.on_duration_reconfigured(initial_seconds);
        self.reconcile_all();
        true
    }

    /// Supply a new starting value to every timer
    pub fn reconfigure_all(&mut self, initial_seconds: u64) {
        for timer in self.timers.values_mut() {
            timer.on_duration_reconfigured(initial_seconds);
        }
        self.reconcile_all();
    }

    pub fn rotate(&mut self, id: TimerId) -> Option<Orientation> {
        self.timers.get_mut(&id).map(TimerController::rotate)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            active: self.active,
            paused: self.paused,
            timers: self.timers.values().map(TimerController::snapshot).collect(),
        }
    }

    /// Tear down every timer
    pub fn shutdown(&mut self) {
        let count = self.timers.len();
        self.timers.clear();
        self.active = None;
        info!("Board shut down, {} timers released", count);
    }

    fn reconcile_all(&mut self) {
        let view = self.view();
        for timer in self.timers.values_mut() {
            timer.reconcile(view);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
