//! Time of day with a UTC offset

use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use std::fmt;

/// A time of day paired with the UTC offset it was recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeTz {
    time: NaiveTime,
    offset: FixedOffset,
}

impl TimeTz {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    pub fn utc(time: NaiveTime) -> Self {
        Self::new(time, Utc.fix())
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for TimeTz {
    fn default() -> Self {
        Self::utc(NaiveTime::default())
    }
}

impl fmt::Display for TimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time.format("%H:%M:%S%.f"), self.offset)
    }
}
