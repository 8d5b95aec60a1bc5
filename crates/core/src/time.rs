use std::cell::Cell;
use std::fmt;
use std::ops::{Add, Sub};
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A wall-clock instant in milliseconds since the Unix epoch.
///
/// Fractional milliseconds are kept so that pixel → time conversions stay
/// exact inverses of time → pixel.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> f64 {
        self.0
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.timestamp_micros() as f64 / 1000.0)
    }

    /// Convert to a date-time in `tz`, rounding to the nearest millisecond.
    /// `None` for instants chrono cannot represent.
    pub fn to_datetime<Tz: TimeZone>(self, tz: &Tz) -> Option<DateTime<Tz>> {
        if !self.0.is_finite() {
            return None;
        }
        tz.timestamp_millis_opt(self.0.round() as i64).single()
    }
}

impl Add<f64> for Timestamp {
    type Output = Timestamp;

    fn add(self, ms: f64) -> Timestamp {
        Timestamp(self.0 + ms)
    }
}

impl Sub<f64> for Timestamp {
    type Output = Timestamp;

    fn sub(self, ms: f64) -> Timestamp {
        Timestamp(self.0 - ms)
    }
}

/// Elapsed milliseconds between two timestamps.
impl Sub for Timestamp {
    type Output = f64;

    fn sub(self, other: Timestamp) -> f64 {
        self.0 - other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime(&Utc) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Source of real wall-clock time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(&Utc::now())
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start.as_millis())),
        }
    }

    pub fn set(&self, t: Timestamp) {
        self.now.set(t.as_millis());
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}
