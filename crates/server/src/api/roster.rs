use crate::state::{AppState, load_roster};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buswatch::prelude::Roster;
use futures_util::StreamExt;
use reqwest::header::ACCEPT_ENCODING;
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{error, info, warn};

/// Seconds since the roster on disk was last replaced.
pub async fn age(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    if state.roster_path.exists() {
        let last_modified = seconds_since_modified(&state.roster_path)?;
        Ok(last_modified.to_string().into_response())
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

fn seconds_since_modified<P: AsRef<Path>>(path: P) -> Result<u64, StatusCode> {
    let modified = fs::metadata(path)
        .and_then(|meta_data| meta_data.modified())
        .map_err(|err| {
            error!("Failed to read roster modification time: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    let elapsed = modified.elapsed().map_err(|err| {
        error!("Roster modified in the future: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(elapsed.as_secs())
}

/// Downloads a roster zip from `url` next to the current one, loads it and
/// only then moves it into place. The conductor's live position survives the
/// swap.
pub async fn fetch_roster(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let Some(url) = params.get("url") else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if state.roster_path.is_dir() {
        error!("Roster at {:?} is a directory, refusing to overwrite", state.roster_path);
        return Err(StatusCode::CONFLICT);
    }

    let staging = state.roster_path.with_extension("download");
    if let Err(status) = download(url, &staging).await {
        discard(&staging).await;
        return Err(status);
    }
    let mut roster = install_roster(&staging, &state.roster_path).await?;
    let receiver = state.session.lock().await.subscribe();
    let live = receiver.borrow().clone();
    if let Some(sample) = live {
        roster.update_position(sample);
    }

    info!(buses = roster.buses.len(), "Roster reloaded");
    *state.roster.write().await = roster;
    Ok(().into_response())
}

async fn download(url: &str, path: &Path) -> Result<(), StatusCode> {
    let response = reqwest::Client::new()
        .get(url)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await
        .map_err(|err| {
            error!("Failed to fetch roster: {err}");
            StatusCode::BAD_GATEWAY
        })?;

    if !response.status().is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("Roster download failed: {body}");
        return Err(StatusCode::BAD_GATEWAY);
    }

    let mut file = File::create(path).await.map_err(|err| {
        error!("Failed to create roster file: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let data = chunk.map_err(|err| {
            error!("Failed to fetch chunk: {err}");
            StatusCode::BAD_GATEWAY
        })?;
        file.write_all(&data).await.map_err(|err| {
            error!("Failed to write roster file: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    }
    file.flush().await.map_err(|err| {
        error!("Failed to flush roster file: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Loads the roster at `staging` and renames it over `target`. A roster that
/// fails to load is deleted and `target` is left untouched.
async fn install_roster(staging: &Path, target: &Path) -> Result<Roster, StatusCode> {
    let path = staging.to_path_buf();
    let loaded = tokio::task::spawn_blocking(move || load_roster(&path))
        .await
        .map_err(|err| {
            error!("Roster loading task failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    let roster = match loaded {
        Ok(roster) => roster,
        Err(err) => {
            error!("Failed to load downloaded roster: {err}");
            discard(staging).await;
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
    };
    tokio::fs::rename(staging, target).await.map_err(|err| {
        error!("Failed to move roster into place: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(roster)
}

async fn discard(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove {path:?}: {err}");
    }
}

#[tokio::test]
async fn failed_load_keeps_current_roster_test() {
    let dir = std::env::temp_dir().join(format!("buswatch-install-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let target = dir.join("roster.zip");
    let staging = dir.join("roster.download");
    fs::write(&target, b"current roster").unwrap();
    fs::write(&staging, b"truncated download").unwrap();

    let result = install_roster(&staging, &target).await;
    assert_eq!(result.err(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    assert_eq!(fs::read(&target).unwrap(), b"current roster");
    assert!(!staging.exists());

    fs::remove_dir_all(&dir).unwrap();
}
