mod conductor;
mod roster;
mod search;
mod trip;

pub use conductor::*;
pub use roster::*;
pub use search::*;
pub use trip::*;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buswatch::{conductor::Error as SessionError, prelude::*, trip::Error as TripError};
use serde::Serialize;
use tracing::warn;

/// Parses `"lat,lon"`.
fn coordinate_from_str(value: &str) -> Result<Coordinate, StatusCode> {
    let (latitude, longitude) = value.split_once(',').ok_or(StatusCode::BAD_REQUEST)?;
    let latitude: f64 = latitude
        .trim()
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let longitude: f64 = longitude
        .trim()
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok(Coordinate {
        latitude,
        longitude,
    })
}

/// Status code with a notice the app can show as is.
fn notice_response(status: StatusCode, title: &str, message: &str) -> Response {
    match Notice::new(title, message) {
        Some(notice) => (status, Json(notice)).into_response(),
        None => status.into_response(),
    }
}

fn session_error(err: SessionError) -> Response {
    warn!("Conductor request rejected: {err}");
    let status = match &err {
        SessionError::NotVerified | SessionError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        SessionError::Trip(TripError::StopOutOfRange { .. }) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    notice_response(status, "Error", &err.to_string())
}

fn respond<T: Serialize>(result: Result<T, SessionError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err) => session_error(err),
    }
}

#[test]
fn coordinate_from_str_test() {
    assert_eq!(
        coordinate_from_str("28.6139, 77.2090"),
        Ok(Coordinate::new(28.6139, 77.2090))
    );
    assert_eq!(coordinate_from_str("28.6139"), Err(StatusCode::BAD_REQUEST));
    assert_eq!(coordinate_from_str("a,b"), Err(StatusCode::BAD_REQUEST));
}
