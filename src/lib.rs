//! Turn Timer - An HTTP-controlled board of countdown timers
//! 
//! Each timer counts down only while the board names it as the active one
//! and the board is not paused. Pressing a timer asks the board to make it
//! active; the board alone decides.

pub mod api;
pub mod config;
pub mod state;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, Board};
pub use timer::{TimerController, TimerId};
pub use utils::signals::shutdown_signal;
