//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{Board, BoardSnapshot};

/// Main application state shared by every request handler
#[derive(Debug)]
pub struct AppState {
    /// The hosted timers with the active token and pause flag
    pub board: Arc<Mutex<Board>>,
    /// Starting value handed to newly added timers
    pub default_seconds: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState hosting `board`
    pub fn new(port: u16, host: String, board: Board, default_seconds: u64) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            default_seconds,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `updater` against the board and record it as the last action
    pub fn update_board<F, T>(&self, action: &str, updater: F) -> Result<T, String>
    where
        F: FnOnce(&mut Board) -> T,
    {
        let mut board = self.board.lock()
            .map_err(|e| format!("Failed to lock board: {}", e))?;

        let result = updater(&mut board);
        drop(board); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(result)
    }

    /// Set the global pause flag
    pub fn set_paused(&self, paused: bool) -> Result<BoardSnapshot, String> {
        info!("Setting paused state to: {}", paused);
        self.update_board(
            if paused { "pause" } else { "resume" },
            |board| {
                board.set_paused(paused);
                board.snapshot()
            },
        )
    }

    /// Get current board snapshot
    pub fn get_board(&self) -> Result<BoardSnapshot, String> {
        self.board.lock()
            .map(|board| board.snapshot())
            .map_err(|e| format!("Failed to lock board: {}", e))
    }

    /// Release every timer, used on shutdown
    pub fn shutdown(&self) {
        match self.board.lock() {
            Ok(mut board) => board.shutdown(),
            Err(e) => warn!("Failed to lock board for shutdown: {}", e),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_board_records_last_action() {
        let state = AppState::new(0, "127.0.0.1".to_string(), Board::with_timers(2, 60), 60);
        assert_eq!(state.get_last_action().0, None);

        let id = state.update_board("add", |board| board.add_timer(30)).unwrap();
        let (action, time) = state.get_last_action();

        assert_eq!(id.raw(), 3);
        assert_eq!(action.as_deref(), Some("add"));
        assert!(time.is_some());
        assert_eq!(state.get_board().unwrap().timers.len(), 3);
    }

    #[tokio::test]
    async fn pause_is_reflected_in_snapshot() {
        let state = AppState::new(0, "127.0.0.1".to_string(), Board::with_timers(2, 60), 60);
        assert!(state.set_paused(true).unwrap().paused);
        assert!(!state.set_paused(false).unwrap().paused);
        assert_eq!(state.get_last_action().0.as_deref(), Some("resume"));
    }
}
