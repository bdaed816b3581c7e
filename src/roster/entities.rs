use std::{str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::shared::{
    Identifiable,
    geo::{Coordinate, Distance},
};

/// How full a bus currently is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    #[default]
    Low,
    Medium,
    High,
}

impl FromStr for Occupancy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown occupancy {other}")),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusStatus {
    #[default]
    Active,
    Inactive,
}

impl FromStr for BusStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown bus status {other}")),
        }
    }
}

/// A bus in service, as published by the operator.
#[derive(Debug, Default, Clone)]
pub struct BusRecord {
    /// The internal index used for O(1) array lookups in the roster.
    pub index: u32,
    /// Unique external identifier.
    pub id: Arc<str>,
    /// The number painted on the bus (e.g., "DL-101").
    pub number: Arc<str>,
    /// Stop names in the order the bus serves them.
    pub route: Box<[Arc<str>]>,
    pub fare: f64,
    pub occupancy: Occupancy,
    pub status: BusStatus,
}

impl BusRecord {
    pub fn new(id: &str, number: &str) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            ..Default::default()
        }
    }

    pub fn with_route<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.route = stops.into_iter().map(|stop| stop.as_ref().into()).collect();
        self
    }

    pub fn with_fare(mut self, fare: f64) -> Self {
        self.fare = fare;
        self
    }

    pub fn with_occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn serves(&self, normalized_stop_name: &str) -> bool {
        self.route
            .iter()
            .any(|stop| crate::shared::normalize_name(stop) == normalized_stop_name)
    }
}

/// A physical place where passengers board.
#[derive(Debug, Default, Clone)]
pub struct Stop {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    /// Name used for fuzzy search comparisons.
    pub normalized_name: Arc<str>,
    pub coordinate: Coordinate,
}

impl Stop {
    pub fn new(id: &str, name: &str, coordinate: Coordinate) -> Self {
        Self {
            index: 0,
            id: id.into(),
            name: name.into(),
            normalized_name: crate::shared::normalize_name(name).into(),
            coordinate,
        }
    }
}

impl Identifiable for Stop {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// A stop close to some point, with the buses calling at it.
#[derive(Debug, Clone)]
pub struct NearbyStop<'a> {
    pub stop: &'a Stop,
    pub distance: Distance,
    /// Numbers of the buses whose route includes this stop.
    pub routes: Vec<Arc<str>>,
}
