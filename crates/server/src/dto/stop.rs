use buswatch::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
}

impl StopDto {
    pub fn from(stop: &Stop) -> Self {
        let id = stop.id.to_string();
        let name = stop.name.to_string();
        let coordinate = stop.coordinate;
        Self {
            id,
            name,
            coordinate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyStopDto {
    #[serde(flatten)]
    pub stop: StopDto,
    /// Meters, rounded.
    pub distance: u32,
    pub routes: Vec<String>,
}

impl NearbyStopDto {
    pub fn from(nearby: &NearbyStop) -> Self {
        Self {
            stop: StopDto::from(nearby.stop),
            distance: nearby.distance.as_meters().round() as u32,
            routes: nearby.routes.iter().map(|route| route.to_string()).collect(),
        }
    }
}
