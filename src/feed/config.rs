use std::time::Duration;

use crate::shared::geo::Coordinate;

/// Used when the device location is unavailable.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(28.6139, 77.2090);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub bus_id: String,
    pub bus_number: String,
    /// Time between two samples while the trip is active.
    pub interval: Duration,
    pub fallback: Coordinate,
    /// Fixed rng seed for reproducible runs, random when `None`.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bus_id: "conductor-bus".into(),
            bus_number: "C001".into(),
            interval: DEFAULT_INTERVAL,
            fallback: DEFAULT_COORDINATE,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_bus(mut self, bus_id: impl Into<String>, bus_number: impl Into<String>) -> Self {
        self.bus_id = bus_id.into();
        self.bus_number = bus_number.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_fallback(mut self, fallback: Coordinate) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
