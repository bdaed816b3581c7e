use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::shared::{
    geo::{Coordinate, Distance},
    time::Duration,
};

/// Average speed of a city bus used to estimate route durations, in km/h.
pub const AVERAGE_BUS_SPEED: f64 = 25.0;
pub const DEFAULT_PATH_POINTS: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Current location is unavailable")]
    Unavailable,
    #[error("Could not find directions: {0}")]
    NoDirections(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub coordinate: Coordinate,
    pub address: Option<String>,
}

impl LocationPoint {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl From<Coordinate> for LocationPoint {
    fn from(value: Coordinate) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directions {
    pub distance: Distance,
    pub duration: Duration,
    /// Polyline from origin to destination, both included.
    pub path: Vec<Coordinate>,
}

/// Device location and routing backend.
pub trait LocationService {
    fn current_location(&self) -> impl Future<Output = Result<LocationPoint, self::Error>> + Send;

    fn directions(
        &self,
        origin: &LocationPoint,
        destination: &LocationPoint,
    ) -> impl Future<Output = Result<Directions, self::Error>> + Send;

    fn calculate_distance(&self, a: &Coordinate, b: &Coordinate) -> Distance {
        a.distance(b)
    }
}

/// Location service without a device or routing engine behind it.
/// Directions follow a straight line stretched by a circuity factor.
#[derive(Debug, Clone)]
pub struct SimulatedLocationService {
    current: Option<LocationPoint>,
    path_points: usize,
    speed: f64,
}

impl Default for SimulatedLocationService {
    fn default() -> Self {
        Self {
            current: None,
            path_points: DEFAULT_PATH_POINTS,
            speed: AVERAGE_BUS_SPEED,
        }
    }
}

impl SimulatedLocationService {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_current(mut self, current: LocationPoint) -> Self {
        self.current = Some(current);
        self
    }

    pub fn with_path_points(mut self, path_points: usize) -> Self {
        self.path_points = path_points.max(2);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    fn straight_line(&self, origin: &Coordinate, destination: &Coordinate) -> Vec<Coordinate> {
        let segments = self.path_points - 1;
        let mut path: Vec<_> = (0..segments)
            .map(|i| origin.lerp(destination, i as f64 / segments as f64))
            .collect();
        path.push(*destination);
        path
    }
}

impl LocationService for SimulatedLocationService {
    async fn current_location(&self) -> Result<LocationPoint, self::Error> {
        self.current.clone().ok_or(self::Error::Unavailable)
    }

    async fn directions(
        &self,
        origin: &LocationPoint,
        destination: &LocationPoint,
    ) -> Result<Directions, self::Error> {
        if origin.coordinate == destination.coordinate {
            return Err(self::Error::NoDirections(
                "origin and destination are the same".into(),
            ));
        }
        let distance = origin.coordinate.network_distance(&destination.coordinate);
        let duration = Duration::for_travel(distance, self.speed);
        let path = self.straight_line(&origin.coordinate, &destination.coordinate);
        debug!(%distance, minutes = duration.as_minutes(), "Built directions");
        Ok(Directions {
            distance,
            duration,
            path,
        })
    }
}
