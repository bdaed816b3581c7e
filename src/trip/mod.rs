mod state;
pub use state::*;

use thiserror::Error;
use tracing::debug;

pub const MAX_STOP_NAME_LEN: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Please enter a stop name")]
    EmptyStopName,
    #[error("Stop name is too long")]
    StopNameTooLong,
    #[error("Stop index {index} is out of range for {len} stops")]
    StopOutOfRange { index: usize, len: usize },
}

/// Owns the lifecycle, passenger counter and stop list of one conductor
/// session. Performs no I/O; callers decide what to do with transitions.
#[derive(Debug, Default, Clone)]
pub struct TripController {
    state: TripState,
}

impl TripController {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn status(&self) -> TripStatus {
        self.state.status
    }

    pub fn passenger_count(&self) -> u32 {
        self.state.passenger_count
    }

    pub fn stops(&self) -> &[String] {
        &self.state.stops
    }

    pub fn state(&self) -> TripState {
        self.state.clone()
    }

    /// Moves from idle to active.
    /// Returns `false` and changes nothing in any other state.
    pub fn start_trip(&mut self) -> bool {
        if self.state.status != TripStatus::Idle {
            return false;
        }
        self.state.status = TripStatus::Active;
        debug!("Trip started");
        true
    }

    /// Moves from active to ended.
    /// Returns `false` and changes nothing in any other state.
    pub fn end_trip(&mut self) -> bool {
        if self.state.status != TripStatus::Active {
            return false;
        }
        self.state.status = TripStatus::Ended;
        debug!(passengers = self.state.passenger_count, "Trip ended");
        true
    }

    /// Returns to idle from any state and clears the passenger count.
    /// The stop list is kept.
    pub fn reset_trip(&mut self) {
        let previous = self.state.status;
        self.state.status = TripStatus::Idle;
        self.state.passenger_count = 0;
        debug!(%previous, "Trip reset");
    }

    pub fn add_passenger(&mut self) -> u32 {
        self.state.passenger_count = self.state.passenger_count.saturating_add(1);
        self.state.passenger_count
    }

    /// Never goes below zero.
    pub fn remove_passenger(&mut self) -> u32 {
        self.state.passenger_count = self.state.passenger_count.saturating_sub(1);
        self.state.passenger_count
    }

    /// Appends a trimmed stop name, returning the new number of stops.
    pub fn add_stop(&mut self, name: &str) -> Result<usize, self::Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self::Error::EmptyStopName);
        }
        if name.chars().count() > MAX_STOP_NAME_LEN {
            return Err(self::Error::StopNameTooLong);
        }
        self.state.stops.push(name.to_string());
        Ok(self.state.stops.len())
    }

    /// Removes and returns the stop at `index`.
    pub fn remove_stop(&mut self, index: usize) -> Result<String, self::Error> {
        let len = self.state.stops.len();
        if index >= len {
            return Err(self::Error::StopOutOfRange { index, len });
        }
        Ok(self.state.stops.remove(index))
    }
}
