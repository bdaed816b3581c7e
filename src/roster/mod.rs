use std::{collections::HashMap, sync::Arc};

mod entities;
pub use entities::*;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    feed::{PositionSample, TICK_SPEED},
    shared::{
        self,
        geo::{Coordinate, Distance},
    },
    source::{self, Source},
};

type IdToIndex = HashMap<Arc<str>, usize>;

/// In-memory copy of the operator's buses and stops, plus the latest known
/// position of each bus. Bus and stop data are read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub buses: Box<[BusRecord]>,
    pub stops: Box<[Stop]>,

    bus_lookup: Arc<IdToIndex>,
    stop_lookup: Arc<IdToIndex>,
    positions: HashMap<Arc<str>, PositionSample>,
}

impl Roster {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads buses, their routes and stops from the given source.
    pub fn with_source(self, source: Source) -> Result<Self, source::Error> {
        let mut buses: Vec<BusRecord> = Vec::new();
        source.stream_buses(|(_, bus)| {
            let occupancy = parse_or_default(bus.occupancy.as_deref(), &bus.bus_id);
            let status = parse_or_default(bus.status.as_deref(), &bus.bus_id);
            buses.push(BusRecord {
                index: 0,
                id: bus.bus_id.into(),
                number: bus.bus_number.into(),
                route: Box::default(),
                fare: bus.fare,
                occupancy,
                status,
            });
        })?;

        let mut routes: HashMap<String, Vec<(u32, String)>> = HashMap::new();
        source.stream_bus_routes(|(_, row)| {
            routes
                .entry(row.bus_id)
                .or_default()
                .push((row.stop_sequence, row.stop_name));
        })?;
        for (bus_id, mut stops) in routes.into_iter() {
            let bus = buses
                .iter_mut()
                .find(|bus| *bus.id == *bus_id)
                .ok_or(source::Error::UnknownBus(bus_id))?;
            stops.sort_by_key(|(sequence, _)| *sequence);
            bus.route = stops.into_iter().map(|(_, name)| name.into()).collect();
        }

        let mut stops: Vec<Stop> = Vec::new();
        source.stream_stops(|(_, stop)| {
            stops.push(Stop::new(
                &stop.stop_id,
                &stop.stop_name,
                Coordinate::new(stop.stop_lat, stop.stop_lon),
            ));
        })?;

        debug!(buses = buses.len(), stops = stops.len(), "Loaded roster");
        Ok(self.with_buses(buses).with_stops(stops))
    }

    /// Only the first bus with a given id is kept, later ones are skipped.
    pub fn with_buses(mut self, buses: Vec<BusRecord>) -> Self {
        let mut lookup: IdToIndex = HashMap::new();
        let mut unique: Vec<BusRecord> = Vec::with_capacity(buses.len());
        for mut bus in buses {
            if lookup.contains_key(&bus.id) {
                warn!(bus_id = %bus.id, number = %bus.number, "Skipping duplicate bus");
                continue;
            }
            bus.index = unique.len() as u32;
            lookup.insert(bus.id.clone(), unique.len());
            unique.push(bus);
        }
        self.positions.retain(|id, _| lookup.contains_key(id));
        self.buses = unique.into();
        self.bus_lookup = lookup.into();
        self
    }

    /// Only the first stop with a given id is kept.
    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        let mut lookup: IdToIndex = HashMap::new();
        let mut unique: Vec<Stop> = Vec::with_capacity(stops.len());
        for mut stop in stops {
            if lookup.contains_key(&stop.id) {
                warn!(stop_id = %stop.id, "Skipping duplicate stop");
                continue;
            }
            stop.index = unique.len() as u32;
            lookup.insert(stop.id.clone(), unique.len());
            unique.push(stop);
        }
        self.stops = unique.into();
        self.stop_lookup = lookup.into();
        self
    }

    pub fn buses(&self) -> &[BusRecord] {
        &self.buses
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Get a bus with the given id.
    /// If no bus is found with the given id None is returned.
    pub fn bus_by_id(&self, id: &str) -> Option<&BusRecord> {
        let index = self.bus_lookup.get(id)?;
        Some(&self.buses[*index])
    }

    /// Get a stop with the given id.
    /// If no stop is found with the given id None is returned.
    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(id)?;
        Some(&self.stops[*index])
    }

    pub fn position_by_bus_id(&self, bus_id: &str) -> Option<&PositionSample> {
        self.positions.get(bus_id)
    }

    /// Replaces the latest position of the reporting bus.
    /// Samples from buses that are not on the roster are ignored.
    pub fn update_position(&mut self, sample: PositionSample) -> bool {
        let Some(index) = self.bus_lookup.get(sample.bus_id.as_str()) else {
            warn!(bus_id = %sample.bus_id, "Ignoring position of unknown bus");
            return false;
        };
        let id = self.buses[*index].id.clone();
        self.positions.insert(id, sample);
        true
    }

    pub fn clear_position(&mut self, bus_id: &str) -> bool {
        self.positions.remove(bus_id).is_some()
    }

    /// Places every bus at a random point in a square of `spread` degrees
    /// around `center`, for when no live feed is connected.
    pub fn scatter_positions<R: Rng>(&mut self, center: Coordinate, spread: f64, rng: &mut R) {
        let half = spread.abs() / 2.0;
        let now = chrono::Utc::now();
        for bus in self.buses.iter() {
            let coordinate = if half > 0.0 {
                center.offset(rng.random_range(-half..half), rng.random_range(-half..half))
            } else {
                center
            };
            let sample = PositionSample {
                bus_id: bus.id.to_string(),
                bus_number: bus.number.to_string(),
                coordinate,
                heading: rng.random_range(0.0..360.0),
                speed: rng.random_range(TICK_SPEED),
                sequence: 0,
                recorded_at: now,
            };
            self.positions.insert(bus.id.clone(), sample);
        }
    }

    /// Does a fuzzy search on all the stops, comparing their name to the needle.
    pub fn search_stops_by_name<'a>(&'a self, needle: &str) -> Vec<&'a Stop> {
        shared::search(needle, &self.stops)
    }

    /// Returns every bus whose route calls at a stop with this name.
    pub fn buses_by_stop_name(&self, stop_name: &str) -> Vec<&BusRecord> {
        let normalized = shared::normalize_name(stop_name);
        self.buses
            .iter()
            .filter(|bus| bus.serves(&normalized))
            .collect()
    }

    /// Returns stops within `radius` of the coordinate, nearest first.
    pub fn stops_near(&self, coordinate: &Coordinate, radius: Distance) -> Vec<NearbyStop<'_>> {
        let mut nearby: Vec<_> = self
            .stops
            .par_iter()
            .filter_map(|stop| {
                let distance = stop.coordinate.distance(coordinate);
                (distance <= radius).then_some((stop, distance))
            })
            .collect();
        nearby.par_sort_by(|(_, a), (_, b)| {
            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
        });
        nearby
            .into_iter()
            .map(|(stop, distance)| NearbyStop {
                stop,
                distance,
                routes: self
                    .buses
                    .iter()
                    .filter(|bus| bus.serves(&stop.normalized_name))
                    .map(|bus| bus.number.clone())
                    .collect(),
            })
            .collect()
    }
}

fn parse_or_default<T>(value: Option<&str>, bus_id: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value.filter(|value| !value.trim().is_empty()) {
        Some(value) => value.parse().unwrap_or_else(|err| {
            warn!("Bus {bus_id}: {err}, using default");
            T::default()
        }),
        None => T::default(),
    }
}
