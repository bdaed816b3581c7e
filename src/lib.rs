pub mod conductor;
pub mod feed;
pub mod location;
pub mod roster;
pub mod search;
pub mod shared;
pub mod source;
pub mod trip;

pub mod prelude {
    pub use crate::conductor::{ConductorSession, CredentialVerifier, FixedCredentials};
    pub use crate::feed::{LiveFeed, PositionSample};
    pub use crate::location::{
        Directions, LocationPoint, LocationService, SimulatedLocationService,
    };
    pub use crate::roster::{BusRecord, BusStatus, NearbyStop, Occupancy, Roster, Stop};
    pub use crate::search::{BusMatch, TrackingTarget};
    pub use crate::shared::{Coordinate, Distance, Duration, Notice};
    pub use crate::source::Source;
    pub use crate::trip::{TripController, TripState, TripStatus};
}
