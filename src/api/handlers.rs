//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, BoardSnapshot},
    timer::{TimerId, TimerSnapshot},
};
use super::responses::{
    ActiveRequest, ApiResponse, DurationRequest, HealthResponse, NewTimerRequest, StatusResponse,
};

fn internal_error(e: String) -> StatusCode {
    error!("Board update failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Map a board operation that may name an unknown timer to a response
fn found(
    outcome: Result<Option<BoardSnapshot>, String>,
    message: String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match outcome.map_err(internal_error)? {
        Some(board) => Ok(Json(ApiResponse::new(message, board))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Handle GET /timers - List every timer
pub async fn list_timers_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TimerSnapshot>>, StatusCode> {
    state.get_board()
        .map(|board| Json(board.timers))
        .map_err(internal_error)
}

/// Handle POST /timers - Add a timer
pub async fn add_timer_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewTimerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, StatusCode> {
    // Only a request without a JSON body falls back to the default
    let requested = match body {
        Ok(Json(request)) => request.initial_seconds,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            warn!("Rejected add timer request: {}", rejection.body_text());
            return Err(rejection.status());
        }
    };
    let initial_seconds = requested.unwrap_or(state.default_seconds);

    let (id, board) = state
        .update_board("add", |board| (board.add_timer(initial_seconds), board.snapshot()))
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::new(format!("Timer {} added", id), board)))
}

/// Handle DELETE /timers/:id - Remove a timer
pub async fn remove_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let id = TimerId::new(id);
    let outcome = state.update_board("remove", |board| {
        board.remove_timer(id).then(|| board.snapshot())
    });
    found(outcome, format!("Timer {} removed", id))
}

/// Handle POST /timers/:id/press - User pressed a timer
pub async fn press_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let id = TimerId::new(id);
    let outcome = state.update_board("press", |board| {
        board.press(id).then(|| board.snapshot())
    });
    info!("Press endpoint called for timer {}", id);
    found(outcome, format!("Timer {} pressed", id))
}

/// Handle POST /timers/:id/rotate - Rotate a timer face
pub async fn rotate_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let id = TimerId::new(id);
    let outcome = state.update_board("rotate", |board| {
        board.rotate(id).map(|_| board.snapshot())
    });
    found(outcome, format!("Timer {} rotated", id))
}

/// Handle PUT /timers/:id/duration - Reconfigure one timer
pub async fn timer_duration_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let id = TimerId::new(id);
    let outcome = state.update_board("duration", |board| {
        board.reconfigure(id, request.seconds).then(|| board.snapshot())
    });
    found(outcome, format!("Timer {} set to {}s", id, request.seconds))
}

/// Handle PUT /timers/duration - Reconfigure every timer
pub async fn board_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let board = state
        .update_board("duration-all", |board| {
            board.reconfigure_all(request.seconds);
            board.snapshot()
        })
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::new(format!("All timers set to {}s", request.seconds), board)))
}

/// Handle PUT /active - Host sets the active timer directly
pub async fn active_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActiveRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let outcome = state.update_board("active", |board| {
        board.set_active(request.id).then(|| board.snapshot())
    });
    found(outcome, format!("Active timer set to {:?}", request.id))
}

/// Handle POST /pause - Pause the board
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    state.set_paused(true)
        .map(|board| Json(ApiResponse::new("Board paused", board)))
        .map_err(internal_error)
}

/// Handle POST /resume - Resume the board
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    state.set_paused(false)
        .map(|board| Json(ApiResponse::new("Board resumed", board)))
        .map_err(internal_error)
}

/// Handle GET /status - Return current board status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let board = state.get_board().map_err(internal_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        board,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
