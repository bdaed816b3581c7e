use std::ops::Range;

use chrono::Utc;
use rand::Rng;

use crate::{feed::PositionSample, shared::geo::Coordinate};

pub const SEED_SPEED: Range<f64> = 30.0..50.0;
pub const TICK_SPEED: Range<f64> = 20.0..60.0;
/// Degrees of latitude/longitude a bus may drift per tick, in each direction.
pub const POSITION_JITTER: f64 = 0.001;
/// Degrees the heading may turn per tick, in each direction.
pub const HEADING_JITTER: f64 = 15.0;

/// Stand-in for a real telemetry source.
/// Each sample is derived from the previous one plus bounded noise, except the
/// speed which is drawn fresh every tick.
#[derive(Debug, Clone)]
pub struct Simulator<R> {
    rng: R,
    bus_id: String,
    bus_number: String,
}

impl<R: Rng> Simulator<R> {
    pub fn new(rng: R, bus_id: impl Into<String>, bus_number: impl Into<String>) -> Self {
        Self {
            rng,
            bus_id: bus_id.into(),
            bus_number: bus_number.into(),
        }
    }

    pub fn seed(&mut self, coordinate: Coordinate) -> PositionSample {
        PositionSample {
            bus_id: self.bus_id.clone(),
            bus_number: self.bus_number.clone(),
            coordinate,
            heading: self.rng.random_range(0.0..360.0),
            speed: self.rng.random_range(SEED_SPEED),
            sequence: 0,
            recorded_at: Utc::now(),
        }
    }

    pub fn step(&mut self, previous: &PositionSample) -> PositionSample {
        let coordinate = previous.coordinate.offset(
            self.rng.random_range(-POSITION_JITTER..POSITION_JITTER),
            self.rng.random_range(-POSITION_JITTER..POSITION_JITTER),
        );
        let turn = self.rng.random_range(-HEADING_JITTER..HEADING_JITTER);
        PositionSample {
            bus_id: previous.bus_id.clone(),
            bus_number: previous.bus_number.clone(),
            coordinate,
            heading: wrap_heading(previous.heading + turn),
            speed: self.rng.random_range(TICK_SPEED),
            sequence: previous.sequence + 1,
            recorded_at: Utc::now(),
        }
    }
}

pub(crate) fn wrap_heading(heading: f64) -> f64 {
    let wrapped = heading.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
