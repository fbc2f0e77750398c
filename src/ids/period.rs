//! Year/month bucket that scopes ATL sequence numbers.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

use super::IdError;

/// A validated `(year, month)` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period, rejecting months outside `1..=12`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Result<Self, IdError> {
        if !(1..=12).contains(&month) {
            return Err(IdError::invalid(format!("month must be 1..=12, got {month}")));
        }
        Ok(Self { year, month })
    }

    /// Parses a period from textual year and month.
    ///
    /// The year may be given with two digits (`"25"`, read as 2025) or in
    /// full (`"2025"`). The month may be zero padded.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] when either part is not a number
    /// or the month is out of range.
    pub fn parse(year: &str, month: &str) -> Result<Self, IdError> {
        let year_text = year.trim();
        let parsed: i32 = year_text
            .parse()
            .map_err(|_| IdError::invalid(format!("year is not a number: {year:?}")))?;
        if parsed < 0 {
            return Err(IdError::invalid(format!("year must not be negative: {year:?}")));
        }
        let full_year = if year_text.len() <= 2 { 2000 + parsed } else { parsed };
        let month: u32 = month
            .trim()
            .parse()
            .map_err(|_| IdError::invalid(format!("month is not a number: {month:?}")))?;
        Self::new(full_year, month)
    }

    /// The period of the calendar date `instant` carries in its own offset.
    #[must_use]
    pub fn of<Tz: TimeZone>(instant: DateTime<Tz>) -> Self {
        Self { year: instant.year(), month: instant.month() }
    }

    /// Full year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, `1..=12`.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Last two digits of the year, zero padded.
    #[must_use]
    pub fn yy(&self) -> String {
        two_digit_year(self.year)
    }

    /// Zero-padded month.
    #[must_use]
    pub fn mm(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.yy(), self.mm())
    }
}

/// Parses an RFC 3339 timestamp, keeping the offset it was written with.
///
/// # Errors
///
/// Returns [`IdError::InvalidInput`] when `text` does not parse.
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, IdError> {
    DateTime::parse_from_rfc3339(text.trim())
        .map_err(|e| IdError::invalid(format!("malformed timestamp {text:?}: {e}")))
}

pub(crate) fn two_digit_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn parses_two_digit_year() {
        let period = Period::parse("25", "04").unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 4);
        assert_eq!(period.to_string(), "25/04");
    }

    #[test]
    fn parses_full_year() {
        let period = Period::parse("2031", "11").unwrap();
        assert_eq!(period.yy(), "31");
        assert_eq!(period.mm(), "11");
    }

    #[test]
    fn pads_single_digit_year_suffix() {
        let period = Period::new(2005, 1).unwrap();
        assert_eq!(period.yy(), "05");
        assert_eq!(period.mm(), "01");
    }

    #[test]
    fn rejects_bad_month() {
        assert!(matches!(Period::new(2025, 0), Err(IdError::InvalidInput(_))));
        assert!(matches!(Period::new(2025, 13), Err(IdError::InvalidInput(_))));
        assert!(matches!(Period::parse("25", "x"), Err(IdError::InvalidInput(_))));
        assert!(matches!(Period::parse("-3", "1"), Err(IdError::InvalidInput(_))));
    }

    #[test]
    fn period_of_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(Period::of(instant), Period::new(2024, 12).unwrap());
    }

    #[test]
    fn period_follows_the_local_calendar_date() {
        let instant = DateTime::parse_from_rfc3339("2025-04-30T23:30:00-05:00").unwrap();
        assert_eq!(Period::of(instant), Period::new(2025, 4).unwrap());
        assert_eq!(Period::of(instant.with_timezone(&Utc)), Period::new(2025, 5).unwrap());
        let east = FixedOffset::east_opt(9 * 3600).unwrap();
        let instant = east.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
        assert_eq!(Period::of(instant), Period::new(2025, 1).unwrap());
    }

    #[test]
    fn timestamps_keep_their_offset() {
        let instant = parse_timestamp(" 2025-01-01T03:00:00+05:30 ").unwrap();
        assert_eq!(instant.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert!(matches!(parse_timestamp("01/01/2025"), Err(IdError::InvalidInput(_))));
    }
}
