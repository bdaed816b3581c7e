use buswatch::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsDto {
    pub distance: String,
    pub duration: String,
    pub path: Vec<Coordinate>,
}

impl DirectionsDto {
    pub fn from(directions: Directions) -> Self {
        Self {
            distance: directions.distance.to_string(),
            duration: directions.duration.to_mins_string(),
            path: directions.path,
        }
    }
}
