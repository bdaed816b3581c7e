use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    feed::PositionSample,
    location::LocationPoint,
    roster::{BusRecord, Roster},
    shared::{geo::Distance, time::Duration},
};

pub const ORIGIN_RADIUS: Distance = Distance::from_kilometers(5.0);
pub const DESTINATION_RADIUS: Distance = Distance::from_kilometers(10.0);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Please select both origin and destination")]
    MissingEndpoints,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// A bus must be strictly closer than this to the origin.
    pub origin_radius: Distance,
    /// A bus must be strictly closer than this to the destination.
    pub destination_radius: Distance,
    pub minutes_per_km: f64,
    /// Upper bound of the random slack added to every estimate.
    pub max_slack_minutes: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin_radius: ORIGIN_RADIUS,
            destination_radius: DESTINATION_RADIUS,
            minutes_per_km: 3.0,
            max_slack_minutes: 10.0,
        }
    }
}

/// A bus that can take the passenger from origin to destination.
#[derive(Debug, Clone)]
pub struct BusMatch<'a> {
    pub bus: &'a BusRecord,
    pub position: &'a PositionSample,
    /// Distance from the origin to the bus, rounded to 100 m.
    pub distance: Distance,
    pub estimated_time: Duration,
}

/// Finds the buses near both the origin and the destination, in roster order.
/// Buses without a known position are skipped.
pub fn search<'a, R: Rng>(
    roster: &'a Roster,
    origin: Option<&LocationPoint>,
    destination: Option<&LocationPoint>,
    config: &Config,
    rng: &mut R,
) -> Result<Vec<BusMatch<'a>>, self::Error> {
    let (Some(origin), Some(destination)) = (origin, destination) else {
        return Err(self::Error::MissingEndpoints);
    };

    let matches: Vec<_> = roster
        .buses
        .iter()
        .filter_map(|bus| {
            let position = roster.position_by_bus_id(&bus.id)?;
            let to_origin = origin.coordinate.distance(&position.coordinate);
            let to_destination = destination.coordinate.distance(&position.coordinate);
            if to_origin >= config.origin_radius || to_destination >= config.destination_radius {
                return None;
            }
            Some((bus, position, to_origin))
        })
        .collect();

    let results: Vec<_> = matches
        .into_iter()
        .map(|(bus, position, to_origin)| {
            let km = to_origin.as_kilometers();
            let slack = if config.max_slack_minutes > 0.0 {
                rng.random_range(0.0..config.max_slack_minutes)
            } else {
                0.0
            };
            let minutes = (km * config.minutes_per_km + slack).round() as u32;
            BusMatch {
                bus,
                position,
                distance: Distance::from_kilometers((km * 10.0).round() / 10.0),
                estimated_time: Duration::from_minutes(minutes),
            }
        })
        .collect();
    debug!(
        origin = %origin.coordinate,
        destination = %destination.coordinate,
        found = results.len(),
        "Searched buses"
    );
    Ok(results)
}

/// Parameters for opening the live tracking view of one bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingTarget {
    pub bus_id: String,
    pub bus_number: String,
}

impl TrackingTarget {
    /// Returns `None` unless both identifiers are non-blank.
    pub fn new(bus_id: &str, bus_number: &str) -> Option<Self> {
        let bus_id = bus_id.trim();
        let bus_number = bus_number.trim();
        if bus_id.is_empty() || bus_number.is_empty() {
            return None;
        }
        Some(Self {
            bus_id: bus_id.to_string(),
            bus_number: bus_number.to_string(),
        })
    }

    pub fn for_bus(bus: &BusRecord) -> Option<Self> {
        Self::new(&bus.id, &bus.number)
    }
}
