//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and request/response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers", get(list_timers_handler).post(add_timer_handler))
        .route("/timers/duration", put(board_duration_handler))
        .route("/timers/:id", delete(remove_timer_handler))
        .route("/timers/:id/press", post(press_handler))
        .route("/timers/:id/rotate", post(rotate_handler))
        .route("/timers/:id/duration", put(timer_duration_handler))
        .route("/active", put(active_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
