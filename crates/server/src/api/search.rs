use std::{collections::HashMap, sync::Arc};

use super::{coordinate_from_str, notice_response};
use crate::{
    dto::{BusMatchDto, DirectionsDto, NearbyStopDto, SearchDto, StopDto, TrackDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buswatch::{prelude::*, search as proximity};
use rand::{SeedableRng, rngs::StdRng};
use tracing::warn;

const DEFAULT_NEAR_RADIUS: f64 = 1000.0;

fn location_param(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<LocationPoint>, StatusCode> {
    params
        .get(key)
        .map(|value| coordinate_from_str(value).map(LocationPoint::from))
        .transpose()
}

fn count_param(params: &HashMap<String, String>) -> Result<usize, StatusCode> {
    match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST),
        None => Ok(5),
    }
}

/// Buses currently near both `from` and `to`, plus directions between them.
pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let origin = location_param(&params, "from")?;
    let destination = location_param(&params, "to")?;

    let directions = match (&origin, &destination) {
        (Some(origin), Some(destination)) => {
            match state.location.directions(origin, destination).await {
                Ok(directions) => Some(DirectionsDto::from(directions)),
                Err(err) => {
                    warn!("Searching without directions: {err}");
                    None
                }
            }
        }
        _ => None,
    };

    let roster = state.roster.read().await;
    let mut rng = StdRng::from_os_rng();
    match proximity::search(
        &roster,
        origin.as_ref(),
        destination.as_ref(),
        &state.search,
        &mut rng,
    ) {
        Ok(found) => {
            let buses = found.iter().map(BusMatchDto::from).collect();
            Ok(Json(SearchDto { buses, directions }).into_response())
        }
        Err(err) => Ok(notice_response(
            StatusCode::BAD_REQUEST,
            "Error",
            &err.to_string(),
        )),
    }
}

pub async fn search_stops(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    if let Some(query) = params.get("q") {
        let count = count_param(&params)?;
        let roster = state.roster.read().await;
        let result: Vec<_> = roster
            .search_stops_by_name(query)
            .into_iter()
            .take(count)
            .map(StopDto::from)
            .collect();
        Ok(Json(result).into_response())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// Stops within `radius` meters of `at`, nearest first.
pub async fn near_stops(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let at = params.get("at").ok_or(StatusCode::BAD_REQUEST)?;
    let at = coordinate_from_str(at)?;
    let radius: f64 = match params.get("radius") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => DEFAULT_NEAR_RADIUS,
    };
    let roster = state.roster.read().await;
    let result: Vec<_> = roster
        .stops_near(&at, Distance::from_meters(radius))
        .iter()
        .map(NearbyStopDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn directions(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let origin = location_param(&params, "from")?.ok_or(StatusCode::BAD_REQUEST)?;
    let destination = location_param(&params, "to")?.ok_or(StatusCode::BAD_REQUEST)?;
    match state.location.directions(&origin, &destination).await {
        Ok(directions) => Ok(Json(DirectionsDto::from(directions)).into_response()),
        Err(err) => {
            warn!("Directions failed: {err}");
            Ok(notice_response(
                StatusCode::NOT_FOUND,
                "Error",
                &err.to_string(),
            ))
        }
    }
}

/// What the passenger's map needs to follow one bus.
pub async fn track(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let bus_id = params.get("bus_id").map(String::as_str).unwrap_or_default();
    let bus_number = params
        .get("bus_number")
        .map(String::as_str)
        .unwrap_or_default();
    let target = TrackingTarget::new(bus_id, bus_number).ok_or(StatusCode::BAD_REQUEST)?;
    let position = state
        .roster
        .read()
        .await
        .position_by_bus_id(&target.bus_id)
        .cloned();
    Ok(Json(TrackDto { target, position }).into_response())
}
