use serde::{Deserialize, Serialize};

/// Header layout of one roster file.
pub trait Table {
    /// Every column the file may carry.
    const COLUMNS: &'static [&'static str];
    /// Columns every file must carry.
    const REQUIRED: &'static [&'static str];
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceBus {
    pub bus_id: String,
    pub bus_number: String,
    pub fare: f64,
    pub occupancy: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceBusRoute {
    pub bus_id: String,
    pub stop_sequence: u32,
    pub stop_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl Table for SourceBus {
    const COLUMNS: &'static [&'static str] = &["bus_id", "bus_number", "fare", "occupancy", "status"];
    const REQUIRED: &'static [&'static str] = &["bus_id", "bus_number", "fare"];
}

impl Table for SourceBusRoute {
    const COLUMNS: &'static [&'static str] = &["bus_id", "stop_sequence", "stop_name"];
    const REQUIRED: &'static [&'static str] = Self::COLUMNS;
}

impl Table for SourceStop {
    const COLUMNS: &'static [&'static str] = &["stop_id", "stop_name", "stop_lat", "stop_lon"];
    const REQUIRED: &'static [&'static str] = Self::COLUMNS;
}
