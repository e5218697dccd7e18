//! Cancellable one-second repeating action

use std::{ops::ControlFlow, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};

/// Interval between countdown steps
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned handle to a running ticker task.
///
/// The task is aborted when the handle is dropped, so holding at most one
/// handle per timer guarantees at most one decrementer per timer.
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Spawn a task calling `on_tick` once per `period`, first after one full
    /// period, until it returns `ControlFlow::Break`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });
        Self { task }
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
