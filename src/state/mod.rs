//! State management module
//! 
//! This module contains the board of timers and the shared application state.

pub mod app_state;
pub mod board;

// Re-export main types
pub use app_state::AppState;
pub use board::{Board, BoardSnapshot};
