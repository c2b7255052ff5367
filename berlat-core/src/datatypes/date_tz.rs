//! Calendar date with a UTC offset

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::fmt;

/// A calendar date paired with the UTC offset it was recorded in
///
/// # Text Form
/// `YYYY-MM-DD+HH:MM`, for example `2024-02-29-05:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTz {
    date: NaiveDate,
    offset: FixedOffset,
}

impl DateTz {
    /// Create a new date with offset
    pub fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        Self { date, offset }
    }

    /// Create a date at UTC
    pub fn utc(date: NaiveDate) -> Self {
        Self::new(date, Utc.fix())
    }

    /// Get the local date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Get the UTC offset
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Get the UTC offset in minutes east of Greenwich
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }
}

impl Default for DateTz {
    fn default() -> Self {
        Self::utc(NaiveDate::default())
    }
}

impl fmt::Display for DateTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date.format("%Y-%m-%d"), self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_tz_display() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let value = DateTz::new(date, FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(value.to_string(), "2024-02-29-05:00");
        assert_eq!(value.offset_minutes(), -300);
    }

    #[test]
    fn test_date_tz_default_is_utc() {
        let value = DateTz::default();
        assert_eq!(value.offset_minutes(), 0);
        assert_eq!(value.date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }
}
