use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a conductor's trip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// No trip running. Initial state and the target of every reset.
    #[default]
    Idle,
    /// The bus is in service and broadcasting its position.
    Active,
    /// The trip finished; only a reset leaves this state.
    Ended,
}

impl Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TripStatus::Idle => "idle",
            TripStatus::Active => "active",
            TripStatus::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Snapshot of everything a conductor manages during a trip.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripState {
    pub status: TripStatus,
    pub passenger_count: u32,
    /// Stop names in display order.
    pub stops: Vec<String>,
}
