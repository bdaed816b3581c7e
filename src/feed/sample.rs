use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::geo::Coordinate;

/// One observation of a bus's physical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub bus_id: String,
    pub bus_number: String,
    pub coordinate: Coordinate,
    /// Degrees clockwise from north, always in `[0, 360)`.
    pub heading: f64,
    /// Kilometers per hour.
    pub speed: f64,
    /// Position of this sample in its feed run, the seed is `0`.
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
}
