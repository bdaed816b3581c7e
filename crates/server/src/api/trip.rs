use super::respond;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NewStop {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Ticket {
    pub payload: String,
}

pub async fn trip_state(State(state): State<Arc<AppState>>) -> Response {
    respond(state.session.lock().await.state())
}

/// Seeds the feed from the location service when it has a fix.
pub async fn start_trip(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session.lock().await;
    let started = session.start_trip_located(&state.location).await;
    respond(started.and_then(|_| session.state()))
}

pub async fn end_trip(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session.lock().await;
    let ended = session.end_trip();
    respond(ended.and_then(|_| session.state()))
}

pub async fn reset_trip(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session.lock().await;
    let reset = session.reset_trip();
    respond(reset.and_then(|_| session.state()))
}

pub async fn add_passenger(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session.lock().await;
    let count = session.add_passenger();
    respond(count.and_then(|_| session.state()))
}

pub async fn remove_passenger(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session.lock().await;
    let count = session.remove_passenger();
    respond(count.and_then(|_| session.state()))
}

pub async fn scan_ticket(
    State(state): State<Arc<AppState>>,
    Json(ticket): Json<Ticket>,
) -> Response {
    let mut session = state.session.lock().await;
    let count = session.scan_ticket(&ticket.payload);
    respond(count.and_then(|_| session.state()))
}

pub async fn add_stop(
    State(state): State<Arc<AppState>>,
    Json(stop): Json<NewStop>,
) -> Response {
    let mut session = state.session.lock().await;
    let added = session.add_stop(&stop.name);
    respond(added.and_then(|_| session.state()))
}

pub async fn remove_stop(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Response {
    let mut session = state.session.lock().await;
    let removed = session.remove_stop(index);
    respond(removed.and_then(|_| session.state()))
}

pub async fn position(State(state): State<Arc<AppState>>) -> Response {
    respond(state.session.lock().await.latest_position())
}
