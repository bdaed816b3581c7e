mod credentials;
pub use credentials::*;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    feed::{self, LiveFeed, PositionSample},
    location::LocationService,
    shared::{Notice, geo::Coordinate},
    trip::{self, TripController, TripState},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Please enter both Conductor ID and Password")]
    MissingCredentials,
    #[error("Credentials are too long")]
    CredentialsTooLong,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Conductor is not verified")]
    NotVerified,
    #[error(transparent)]
    Trip(#[from] trip::Error),
}

/// Everything one signed-in conductor owns: the verification flag, the trip
/// and the live feed of their bus.
///
/// Verification lives only in memory, a fresh session always starts
/// unverified. The feed runs exactly while the trip is active.
pub struct ConductorSession<V> {
    verifier: V,
    verified: bool,
    trip: TripController,
    feed: LiveFeed,
}

impl<V: CredentialVerifier> ConductorSession<V> {
    pub fn new(verifier: V, feed_config: feed::Config) -> Self {
        Self {
            verifier,
            verified: false,
            trip: TripController::new(),
            feed: LiveFeed::new(feed_config),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn verify(&mut self, id: &str, password: &str) -> Result<(), self::Error> {
        if id.trim().is_empty() || password.trim().is_empty() {
            return Err(self::Error::MissingCredentials);
        }
        if id.chars().count() > MAX_CREDENTIAL_LEN || password.chars().count() > MAX_CREDENTIAL_LEN
        {
            return Err(self::Error::CredentialsTooLong);
        }
        if !self.verifier.verify(id, password) {
            warn!("Rejected conductor credentials");
            return Err(self::Error::InvalidCredentials);
        }
        self.verified = true;
        info!(conductor = id.trim(), "Conductor verified");
        Ok(())
    }

    /// Ends the session: stops the feed, resets the trip and forgets the
    /// verification.
    pub fn logout(&mut self) {
        self.feed.stop();
        self.feed.clear();
        self.trip = TripController::new();
        self.verified = false;
        info!("Conductor logged out");
    }

    pub fn state(&self) -> Result<TripState, self::Error> {
        Ok(self.trip()?.state())
    }

    pub fn trip(&self) -> Result<&TripController, self::Error> {
        self.ensure_verified()?;
        Ok(&self.trip)
    }

    /// Starts the trip and, when it actually transitioned, the feed seeded
    /// at `location` (or the configured fallback).
    pub fn start_trip(&mut self, location: Option<Coordinate>) -> Result<bool, self::Error> {
        self.ensure_verified()?;
        if !self.trip.start_trip() {
            return Ok(false);
        }
        self.feed.start(location);
        Ok(true)
    }

    /// Like [`Self::start_trip`] but asks the location service for the seed.
    /// An unavailable location falls back to the configured default.
    pub async fn start_trip_located<L: LocationService>(
        &mut self,
        service: &L,
    ) -> Result<bool, self::Error> {
        self.ensure_verified()?;
        let location = match service.current_location().await {
            Ok(point) => Some(point.coordinate),
            Err(err) => {
                warn!("Using fallback location: {err}");
                None
            }
        };
        self.start_trip(location)
    }

    pub fn end_trip(&mut self) -> Result<bool, self::Error> {
        self.ensure_verified()?;
        if !self.trip.end_trip() {
            return Ok(false);
        }
        self.feed.stop();
        Ok(true)
    }

    pub fn reset_trip(&mut self) -> Result<(), self::Error> {
        self.ensure_verified()?;
        self.trip.reset_trip();
        self.feed.stop();
        self.feed.clear();
        Ok(())
    }

    pub fn add_passenger(&mut self) -> Result<u32, self::Error> {
        self.ensure_verified()?;
        Ok(self.trip.add_passenger())
    }

    pub fn remove_passenger(&mut self) -> Result<u32, self::Error> {
        self.ensure_verified()?;
        Ok(self.trip.remove_passenger())
    }

    /// A decoded ticket counts as exactly one boarding passenger.
    pub fn scan_ticket(&mut self, payload: &str) -> Result<u32, self::Error> {
        self.ensure_verified()?;
        let count = self.trip.add_passenger();
        info!(ticket = payload, passengers = count, "Passenger added via QR scan");
        Ok(count)
    }

    pub fn add_stop(&mut self, name: &str) -> Result<usize, self::Error> {
        self.ensure_verified()?;
        Ok(self.trip.add_stop(name)?)
    }

    pub fn remove_stop(&mut self, index: usize) -> Result<String, self::Error> {
        self.ensure_verified()?;
        Ok(self.trip.remove_stop(index)?)
    }

    pub fn latest_position(&self) -> Result<Option<PositionSample>, self::Error> {
        self.ensure_verified()?;
        Ok(self.feed.latest())
    }

    /// Receives every sample the feed publishes, across trips.
    pub fn subscribe(&self) -> watch::Receiver<Option<PositionSample>> {
        self.feed.subscribe()
    }

    pub fn is_broadcasting(&self) -> bool {
        self.feed.is_running()
    }

    pub fn emergency_notice(&self) -> Notice {
        warn!("Emergency call requested");
        Notice {
            title: "Emergency Call".into(),
            message: "Emergency services (100) have been contacted".into(),
        }
    }

    fn ensure_verified(&self) -> Result<(), self::Error> {
        if self.verified {
            Ok(())
        } else {
            Err(self::Error::NotVerified)
        }
    }
}
