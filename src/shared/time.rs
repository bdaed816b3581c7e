use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::shared::geo::Distance;

/// Whole seconds of travel time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    /// Rounded to the nearest minute.
    pub const fn as_minutes(&self) -> u32 {
        (self.0 + 30) / 60
    }

    /// Time needed to cover `distance` at `speed` km/h.
    /// A zero or negative speed yields a zero duration.
    pub fn for_travel(distance: Distance, speed: f64) -> Self {
        if speed <= 0.0 {
            return Self::default();
        }
        let hours = distance.as_kilometers() / speed;
        Self((hours * 3600.0).round() as u32)
    }

    pub fn to_mins_string(&self) -> String {
        format!("{} min", self.as_minutes())
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

#[test]
fn minutes_round_test() {
    assert_eq!(Duration::from_seconds(89).as_minutes(), 1);
    assert_eq!(Duration::from_seconds(90).as_minutes(), 2);
    assert_eq!(Duration::from_minutes(12).as_minutes(), 12);
}

#[test]
fn travel_time_test() {
    let duration = Duration::for_travel(Distance::from_kilometers(10.0), 20.0);
    assert_eq!(duration, Duration::from_minutes(30));
}

#[test]
fn travel_time_zero_speed_test() {
    let duration = Duration::for_travel(Distance::from_kilometers(10.0), 0.0);
    assert_eq!(duration.as_seconds(), 0);
}

#[test]
fn sub_saturates_test() {
    let duration = Duration::from_minutes(1) - Duration::from_minutes(2);
    assert_eq!(duration.as_seconds(), 0);
}
