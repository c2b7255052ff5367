//! Date and time value types with a fixed UTC offset
//!
//! Zone-less dates and times are represented directly by chrono's
//! `NaiveDate`, `NaiveTime` and `NaiveDateTime`; a datetime with an offset is
//! `DateTime<FixedOffset>`. chrono has no date-only or time-only type that
//! carries an offset, so this module provides [`DateTz`] and [`TimeTz`].

pub mod date_tz;
pub mod time_tz;

pub use date_tz::DateTz;
pub use time_tz::TimeTz;

use chrono::{DateTime, FixedOffset};

/// Datetime with a fixed UTC offset
pub type DatetimeTz = DateTime<FixedOffset>;
