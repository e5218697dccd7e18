//! Countdown timer core
//!
//! A timer counts down only while the host names it as active and is not
//! paused. The host decides which single timer is active; timers only ask.

pub mod controller;
pub mod display;
pub mod id;
pub mod state;
pub mod ticker;

// Re-export main types
pub use controller::{HostView, TimerController, TimerSnapshot};
pub use display::format_remaining;
pub use id::{TimerId, TimerIdSequence};
pub use state::{Orientation, TimerState};
pub use ticker::{TickHandle, TICK_PERIOD};
