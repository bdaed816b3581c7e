use super::{respond, session_error};
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub id: String,
    pub password: String,
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Response {
    let mut session = state.session.lock().await;
    match session.verify(&credentials.id, &credentials.password) {
        Ok(()) => respond(session.state()),
        Err(err) => session_error(err),
    }
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    state.session.lock().await.logout();
    StatusCode::NO_CONTENT.into_response()
}

pub async fn emergency(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.lock().await;
    if !session.is_verified() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(session.emergency_notice()).into_response()
}
