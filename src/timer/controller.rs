//! Per-timer controller: decides whether a timer should be ticking and owns
//! the lifecycle of its ticker.

use std::{
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::{
    display::format_remaining,
    ticker::{TickHandle, TICK_PERIOD},
    Orientation, TimerId, TimerState,
};

/// What the host tells every timer on each observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostView {
    /// Identity of the timer that should be running, if any
    pub active: Option<TimerId>,
    /// Global pause flag
    pub paused: bool,
}

/// Point-in-time view of a timer for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: TimerId,
    pub initial_seconds: u64,
    pub remaining_seconds: u64,
    pub display: String,
    pub orientation: u16,
    pub active: bool,
    pub running: bool,
}

#[derive(Debug)]
struct Shared {
    state: TimerState,
    ticker: Option<TickHandle>,
    /// Bumped on every start so a superseded ticker task can recognise itself
    generation: u64,
}

impl Shared {
    fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    fn stop(&mut self) -> bool {
        self.ticker.take().is_some()
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One countdown timer as seen by the host
#[derive(Debug)]
pub struct TimerController {
    id: TimerId,
    view: HostView,
    shared: Arc<Mutex<Shared>>,
    requests: UnboundedSender<TimerId>,
}

impl TimerController {
    /// Create a stopped timer. Activation requests are sent on `requests`.
    pub fn new(id: TimerId, initial_seconds: u64, requests: UnboundedSender<TimerId>) -> Self {
        Self {
            id,
            view: HostView::default(),
            shared: Arc::new(Mutex::new(Shared {
                state: TimerState::new(initial_seconds),
                ticker: None,
                generation: 0,
            })),
            requests,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the host's last observed active token names this timer
    pub fn is_active(&self) -> bool {
        self.view.active == Some(self.id)
    }

    /// Whether a ticker is currently counting this timer down
    pub fn is_running(&self) -> bool {
        lock(&self.shared).is_running()
    }

    pub fn state(&self) -> TimerState {
        lock(&self.shared).state.clone()
    }

    /// Bring the running/stopped state in line with the host's view
    pub fn reconcile(&mut self, view: HostView) {
        self.view = view;

        if self.is_active() && !view.paused {
            self.start();
            return;
        }

        if lock(&self.shared).stop() {
            debug!("Timer {} stopped (active={:?}, paused={})", self.id, view.active, view.paused);
        }
    }

    /// React to a user press: ask the host to make this timer active, then
    /// start ticking right away without waiting for the host's answer.
    pub fn on_activation_requested(&mut self) {
        if self.requests.send(self.id).is_err() {
            debug!("Host no longer listens for activation requests from timer {}", self.id);
        }

        if !self.view.paused {
            self.start();
        }
    }

    /// Turn the face a quarter turn. Never touches activation.
    pub fn rotate(&mut self) -> Orientation {
        lock(&self.shared).state.rotate()
    }

    /// The host supplied a (possibly) new starting value for this timer
    pub fn on_duration_reconfigured(&mut self, initial_seconds: u64) {
        let mut shared = lock(&self.shared);
        if !shared.state.reconfigure(initial_seconds) {
            return;
        }

        info!("Timer {} reset to {}", self.id, format_remaining(initial_seconds));
        if shared.state.is_expired() && shared.stop() {
            debug!("Timer {} stopped after reset to zero", self.id);
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let shared = lock(&self.shared);
        TimerSnapshot {
            id: self.id,
            initial_seconds: shared.state.initial_seconds(),
            remaining_seconds: shared.state.remaining_seconds(),
            display: format_remaining(shared.state.remaining_seconds()),
            orientation: shared.state.orientation().degrees(),
            active: self.is_active(),
            running: shared.is_running(),
        }
    }

    /// Start a ticker unless one is running or nothing is left to count
    fn start(&mut self) {
        let mut shared = lock(&self.shared);
        if shared.is_running() || shared.state.is_expired() {
            return;
        }

        shared.generation += 1;
        let generation = shared.generation;
        let weak = Arc::downgrade(&self.shared);
        let id = self.id;
        shared.ticker = Some(TickHandle::spawn(TICK_PERIOD, move || tick(id, &weak, generation)));

        debug!(
            "Timer {} started at {}",
            self.id,
            format_remaining(shared.state.remaining_seconds())
        );
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        if lock(&self.shared).stop() {
            debug!("Timer {} torn down while running", self.id);
        }
    }
}

/// One countdown step, run from the ticker task
fn tick(id: TimerId, shared: &Weak<Mutex<Shared>>, generation: u64) -> ControlFlow<()> {
    let Some(shared) = shared.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut shared = lock(&shared);

    if shared.generation != generation || !shared.is_running() {
        return ControlFlow::Break(());
    }

    if shared.state.tick() > 0 {
        return ControlFlow::Continue(());
    }

    info!("Timer {} expired", id);
    shared.stop();
    ControlFlow::Break(())
}
