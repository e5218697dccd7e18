//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::BoardSnapshot, timer::TimerId};

/// API response structure for board-changing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub board: BoardSnapshot,
}

impl ApiResponse {
    pub fn new(message: impl Into<String>, board: BoardSnapshot) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            board,
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub board: BoardSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of POST /timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTimerRequest {
    pub initial_seconds: Option<u64>,
}

/// Body of the duration endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub seconds: u64,
}

/// Body of PUT /active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRequest {
    pub id: Option<TimerId>,
}
