use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::time::sleep;
use tower::ServiceExt;

use turn_timer::{
    api::responses::{ApiResponse, StatusResponse},
    create_router,
    timer::TimerSnapshot,
    AppState, Board,
};

fn app(players: usize, seconds: u64) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Board::with_timers(players, seconds),
        seconds,
    ));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json<T: DeserializeOwned>(app: &Router, method: Method, uri: &str, body: Option<Value>) -> T {
    let (status, bytes) = send(app, method, uri, body).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    serde_json::from_slice(&bytes).unwrap()
}

async fn ticks(n: u64) {
    sleep(Duration::from_secs(n) + Duration::from_millis(10)).await;
}

#[tokio::test]
async fn health_and_status() {
    let (app, _) = app(2, 600);

    let health: Value = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(health["status"], "ok");

    let status: StatusResponse = send_json(&app, Method::GET, "/status", None).await;
    assert_eq!(status.board.timers.len(), 2);
    assert_eq!(status.board.active, None);
    assert_eq!(status.board.timers[0].display, "10:00");
    assert_eq!(status.last_action, None);
}

#[tokio::test(start_paused = true)]
async fn press_switches_the_running_timer() {
    let (app, _) = app(2, 10);

    let response: ApiResponse = send_json(&app, Method::POST, "/timers/1/press", None).await;
    assert_eq!(response.board.active.map(|id| id.raw()), Some(1));
    ticks(5).await;

    let response: ApiResponse = send_json(&app, Method::POST, "/timers/2/press", None).await;
    let timers = response.board.timers;
    assert_eq!(timers[0].remaining_seconds, 5);
    assert!(!timers[0].running);
    assert!(timers[1].running);
    assert!(timers[1].active);

    ticks(2).await;
    let timers: Vec<TimerSnapshot> = send_json(&app, Method::GET, "/timers", None).await;
    assert_eq!(timers[0].remaining_seconds, 5);
    assert_eq!(timers[1].remaining_seconds, 8);
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume() {
    let (app, state) = app(2, 10);
    send_json::<ApiResponse>(&app, Method::POST, "/timers/1/press", None).await;
    ticks(2).await;

    let response: ApiResponse = send_json(&app, Method::POST, "/pause", None).await;
    assert!(response.board.paused);
    assert!(response.board.timers.iter().all(|t| !t.running));
    ticks(3).await;

    let response: ApiResponse = send_json(&app, Method::POST, "/resume", None).await;
    assert_eq!(response.board.timers[0].remaining_seconds, 8);
    assert!(response.board.timers[0].running);
    assert_eq!(state.get_last_action().0.as_deref(), Some("resume"));
}

#[tokio::test(start_paused = true)]
async fn rotate_does_not_activate() {
    let (app, _) = app(2, 10);

    let response: ApiResponse = send_json(&app, Method::POST, "/timers/2/rotate", None).await;
    assert_eq!(response.board.active, None);
    assert_eq!(response.board.timers[1].orientation, 90);
    assert!(!response.board.timers[1].running);
}

#[tokio::test(start_paused = true)]
async fn durations_reset_remaining() {
    let (app, _) = app(2, 10);
    send_json::<ApiResponse>(&app, Method::POST, "/timers/1/press", None).await;
    ticks(3).await;

    let response: ApiResponse =
        send_json(&app, Method::PUT, "/timers/1/duration", Some(json!({ "seconds": 90 }))).await;
    assert_eq!(response.board.timers[0].remaining_seconds, 90);
    assert_eq!(response.board.timers[1].remaining_seconds, 10);

    let response: ApiResponse =
        send_json(&app, Method::PUT, "/timers/duration", Some(json!({ "seconds": 3600 }))).await;
    assert!(response.board.timers.iter().all(|t| t.display == "1:00:00"));
    assert!(response.board.timers[0].running);
}

#[tokio::test]
async fn add_and_remove_timers() {
    let (app, _) = app(2, 600);

    let response: ApiResponse = send_json(&app, Method::POST, "/timers", None).await;
    assert_eq!(response.board.timers[2].initial_seconds, 600);

    let response: ApiResponse =
        send_json(&app, Method::POST, "/timers", Some(json!({ "initial_seconds": 45 }))).await;
    assert_eq!(response.board.timers[3].id.raw(), 4);
    assert_eq!(response.board.timers[3].display, "0:45");

    let response: ApiResponse = send_json(&app, Method::DELETE, "/timers/1", None).await;
    assert_eq!(response.board.timers.len(), 3);

    let (status, _) = send(&app, Method::DELETE, "/timers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn host_sets_active_directly() {
    let (app, _) = app(2, 10);

    let response: ApiResponse = send_json(&app, Method::PUT, "/active", Some(json!({ "id": 2 }))).await;
    assert!(response.board.timers[1].running);

    let response: ApiResponse = send_json(&app, Method::PUT, "/active", Some(json!({ "id": null }))).await;
    assert!(response.board.timers.iter().all(|t| !t.running));

    let (status, _) = send(&app, Method::PUT, "/active", Some(json!({ "id": 9 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_timers_are_not_found() {
    let (app, _) = app(2, 10);

    for (method, uri) in [
        (Method::POST, "/timers/42/press"),
        (Method::POST, "/timers/42/rotate"),
    ] {
        let (status, _) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }

    let (status, _) = send(&app, Method::PUT, "/timers/42/duration", Some(json!({ "seconds": 5 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_timer_body_is_rejected() {
    let (app, _) = app(2, 600);

    let (status, _) =
        send(&app, Method::POST, "/timers", Some(json!({ "initial_seconds": "oops" }))).await;
    assert!(status.is_client_error(), "{}", status);

    let (status, _) = send(&app, Method::POST, "/timers", Some(json!({ "initial_seconds": -5 }))).await;
    assert!(status.is_client_error(), "{}", status);

    let timers: Vec<TimerSnapshot> = send_json(&app, Method::GET, "/timers", None).await;
    assert_eq!(timers.len(), 2);
}
