mod config;
mod sample;
mod simulator;

pub use config::*;
pub use sample::*;
pub use simulator::*;

use rand::{SeedableRng, rngs::StdRng};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::shared::geo::Coordinate;

type Latest = watch::Sender<Option<PositionSample>>;

struct Run {
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Periodic simulated position broadcast for the conductor's bus.
///
/// Only the latest sample is kept. Subscribers get it through a
/// [`watch::Receiver`] and are woken for every new one.
pub struct LiveFeed {
    config: self::Config,
    latest: Arc<Latest>,
    run: Option<Run>,
}

impl LiveFeed {
    pub fn new(config: self::Config) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            config,
            latest: Arc::new(latest),
            run: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn latest(&self) -> Option<PositionSample> {
        self.latest.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<PositionSample>> {
        self.latest.subscribe()
    }

    /// Publishes a seed sample right away and schedules one sample per
    /// interval after it. Must be called from within a tokio runtime.
    /// Returns `false` when the feed is already running or the configured
    /// interval is zero.
    pub fn start(&mut self, location: Option<Coordinate>) -> bool {
        if self.run.is_some() {
            return false;
        }
        if self.config.interval.is_zero() {
            warn!(bus = %self.config.bus_number, "Live feed interval is zero, not starting");
            return false;
        }

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut simulator = Simulator::new(rng, &self.config.bus_id, &self.config.bus_number);
        let seed = simulator.seed(location.unwrap_or(self.config.fallback));
        info!(
            bus = %seed.bus_number,
            coordinate = %seed.coordinate,
            "Starting live feed"
        );
        self.latest.send_replace(Some(seed.clone()));

        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(run(
            self.latest.clone(),
            cancelled.clone(),
            simulator,
            seed,
            self.config.interval,
        ));
        self.run = Some(Run { cancelled, handle });
        true
    }

    /// Cancels the running feed. Once this returns the run will never publish
    /// again, even if its timer already fired.
    /// Returns `false` when nothing was running.
    pub fn stop(&mut self) -> bool {
        let Some(run) = self.run.take() else {
            return false;
        };
        // Taking the channel's write lock orders the flag against any publish
        // that is in flight.
        self.latest.send_if_modified(|_| {
            run.cancelled.store(true, Ordering::Release);
            false
        });
        run.handle.abort();
        info!(bus = %self.config.bus_number, "Stopped live feed");
        true
    }

    /// Forgets the retained sample.
    pub fn clear(&mut self) {
        self.latest.send_replace(None);
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(
    latest: Arc<Latest>,
    cancelled: Arc<AtomicBool>,
    mut simulator: Simulator<StdRng>,
    seed: PositionSample,
    period: std::time::Duration,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut previous = seed;
    loop {
        interval.tick().await;
        let sample = simulator.step(&previous);
        let published = latest.send_if_modified(|slot| {
            if cancelled.load(Ordering::Acquire) {
                return false;
            }
            *slot = Some(sample.clone());
            true
        });
        if !published {
            break;
        }
        debug!(
            sequence = sample.sequence,
            coordinate = %sample.coordinate,
            heading = sample.heading,
            speed = sample.speed,
            "Published position"
        );
        previous = sample;
    }
}
