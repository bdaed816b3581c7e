use buswatch::{
    feed::DEFAULT_COORDINATE,
    prelude::*,
    search,
    source,
};
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// Degrees around the default coordinate that unfed buses are scattered over.
pub const SCATTER_SPREAD: f64 = 0.1;

pub struct AppState {
    pub roster_path: PathBuf,
    pub roster: RwLock<Roster>,
    pub location: SimulatedLocationService,
    pub session: Mutex<ConductorSession<FixedCredentials>>,
    pub search: search::Config,
}

/// Loads a roster from a zip archive or a directory of csv files and gives
/// every bus a simulated starting position.
pub fn load_roster(path: &Path) -> Result<Roster, source::Error> {
    let source = Source::new(source::Config::default());
    let source = if path.is_dir() {
        source.from_directory(path.to_path_buf())
    } else {
        source.from_zip(path.to_path_buf())
    };
    let mut roster = Roster::new().with_source(source)?;
    roster.scatter_positions(
        DEFAULT_COORDINATE,
        SCATTER_SPREAD,
        &mut StdRng::from_os_rng(),
    );
    Ok(roster)
}
