use super::DirectionsDto;
use buswatch::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BusDto {
    pub id: String,
    pub number: String,
    pub route: Vec<String>,
    pub fare: f64,
    pub occupancy: Occupancy,
    pub status: BusStatus,
}

impl BusDto {
    pub fn from(bus: &BusRecord) -> Self {
        Self {
            id: bus.id.to_string(),
            number: bus.number.to_string(),
            route: bus.route.iter().map(|stop| stop.to_string()).collect(),
            fare: bus.fare,
            occupancy: bus.occupancy,
            status: bus.status,
        }
    }
}

/// A search hit as shown in the passenger's result list.
#[derive(Debug, Clone, Serialize)]
pub struct BusMatchDto {
    #[serde(flatten)]
    pub bus: BusDto,
    /// Kilometers from the origin, one decimal.
    pub distance: f64,
    /// Minutes.
    pub estimated_time: u32,
    pub position: PositionSample,
}

impl BusMatchDto {
    pub fn from(found: &BusMatch) -> Self {
        Self {
            bus: BusDto::from(found.bus),
            distance: found.distance.as_kilometers(),
            estimated_time: found.estimated_time.as_minutes(),
            position: found.position.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackDto {
    pub target: TrackingTarget,
    pub position: Option<PositionSample>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchDto {
    pub buses: Vec<BusMatchDto>,
    /// Absent when no route could be drawn between the endpoints.
    pub directions: Option<DirectionsDto>,
}
