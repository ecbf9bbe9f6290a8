//! # Warehouse Clock
//!
//! All "now" readings go through [`WarehouseClock`] so tests can pin the time of day.
//! The operating day starts at a configured UTC time (04:30 by default); dispatch plans
//! measure rider time from that instant.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

pub trait WarehouseClock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;

    /// The operating day `now` falls in.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock handle shared between actors and services.
pub type SharedClock = Arc<dyn WarehouseClock>;

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WarehouseClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }
}

impl WarehouseClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// The instant the operating day `date` begins.
pub fn day_start(date: NaiveDate, start: NaiveTime) -> DateTime<Utc> {
    date.and_time(start).and_utc()
}
