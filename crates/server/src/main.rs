mod api;
mod dto;
mod state;

use crate::state::{AppState, load_roster};
use axum::routing::{delete, get, post};
use buswatch::{feed, prelude::*, search};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

const PORT: u32 = 3000;
const DEFAULT_ROSTER_PATH: &str = "roster.zip";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let roster_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            warn!("No roster given, starting empty at {DEFAULT_ROSTER_PATH}");
            PathBuf::from(DEFAULT_ROSTER_PATH)
        }
    };

    let roster = if roster_path.exists() {
        info!("Loading roster...");
        let now = Instant::now();
        let roster = match load_roster(&roster_path) {
            Ok(roster) => roster,
            Err(err) => {
                error!("Failed to load roster from {roster_path:?}: {err}");
                std::process::exit(1);
            }
        };
        info!("Loading roster took {:?}", now.elapsed());
        roster
    } else {
        Roster::new()
    };

    let feed_config = feed::Config::default();
    if roster.bus_by_id(&feed_config.bus_id).is_none() {
        warn!(
            "Conductor bus {} is not on the roster, passengers will not find it",
            feed_config.bus_id
        );
    }
    let bus_id = feed_config.bus_id.clone();

    let state = Arc::new(AppState {
        roster_path,
        roster: RwLock::new(roster),
        location: SimulatedLocationService::new()
            .with_current(LocationPoint::new(feed::DEFAULT_COORDINATE)),
        session: Mutex::new(ConductorSession::new(
            FixedCredentials::default(),
            feed_config,
        )),
        search: search::Config::default(),
    });
    forward_positions(state.clone(), bus_id).await;

    let app = axum::Router::new()
        .route("/conductor/verify", post(api::verify))
        .route("/conductor/logout", post(api::logout))
        .route("/conductor/emergency", post(api::emergency))
        .route("/trip", get(api::trip_state))
        .route("/trip/start", post(api::start_trip))
        .route("/trip/end", post(api::end_trip))
        .route("/trip/reset", post(api::reset_trip))
        .route("/trip/passengers/add", post(api::add_passenger))
        .route("/trip/passengers/remove", post(api::remove_passenger))
        .route("/trip/scan", post(api::scan_ticket))
        .route("/trip/stops", post(api::add_stop))
        .route("/trip/stops/{index}", delete(api::remove_stop))
        .route("/trip/position", get(api::position))
        .route("/search", get(api::search))
        .route("/stops/search", get(api::search_stops))
        .route("/stops/near", get(api::near_stops))
        .route("/directions", get(api::directions))
        .route("/track", get(api::track))
        .route("/roster/age", get(api::age))
        .route("/roster/fetch", post(api::fetch_roster))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {PORT}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {PORT}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

/// Mirrors the conductor's feed into the roster so passenger searches see it.
async fn forward_positions(state: Arc<AppState>, bus_id: String) {
    let mut receiver = state.session.lock().await.subscribe();
    tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let sample = receiver.borrow_and_update().clone();
            let mut roster = state.roster.write().await;
            match sample {
                Some(sample) => roster.update_position(sample),
                None => roster.clear_position(&bus_id),
            };
        }
    });
}
