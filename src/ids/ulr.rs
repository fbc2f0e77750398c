//! Unique lab report numbers.
//!
//! A ULR is `<ulr_prefix><YY><9-digit seconds><ulr_suffix>`. The sequence
//! part is the creation instant in Unix seconds, reduced to its last nine
//! digits. Two reports created within the same second get the same digits.

use chrono::{DateTime, TimeZone};

use super::period::{parse_timestamp, two_digit_year};
use super::{IdError, IdFormat};

/// Length of a ULR built with the default prefix and suffix.
pub const ULR_LEN: usize = 18;

const SEQUENCE_MODULUS: i64 = 1_000_000_000;

/// Builds a ULR from a year and an RFC 3339 creation timestamp.
///
/// # Errors
///
/// Returns [`IdError::InvalidInput`] when `created_at` does not parse.
pub fn generate_ulr(format: &IdFormat, year: i32, created_at: &str) -> Result<String, IdError> {
    Ok(ulr_at(format, year, parse_timestamp(created_at)?))
}

/// Builds a ULR from an already parsed instant.
#[must_use]
pub fn ulr_at<Tz: TimeZone>(format: &IdFormat, year: i32, created_at: DateTime<Tz>) -> String {
    // `timestamp()` floors toward negative infinity; rem_euclid keeps pre-epoch values positive.
    let sequence = created_at.timestamp().rem_euclid(SEQUENCE_MODULUS);
    format!("{}{}{sequence:09}{}", format.ulr_prefix, two_digit_year(year), format.ulr_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn new_year_2025() {
        let ulr = generate_ulr(&IdFormat::default(), 2025, "2025-01-01T00:00:00.000Z").unwrap();
        assert_eq!(ulr, "TC874925735689600F");
        assert_eq!(ulr.len(), ULR_LEN);
    }

    #[test]
    fn idempotent_for_same_input() {
        let first = generate_ulr(&IdFormat::default(), 2024, "2024-07-09T13:45:12.345Z").unwrap();
        let second = generate_ulr(&IdFormat::default(), 2024, "2024-07-09T13:45:12.345Z").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), ULR_LEN);
        assert!(first.ends_with('F'));
    }

    #[test]
    fn same_second_collides_next_second_differs() {
        let format = IdFormat::default();
        let a = generate_ulr(&format, 2025, "2025-03-01T10:00:00.100Z").unwrap();
        let b = generate_ulr(&format, 2025, "2025-03-01T10:00:00.900Z").unwrap();
        let c = generate_ulr(&format, 2025, "2025-03-01T10:00:01.000Z").unwrap();
        assert_eq!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn small_timestamps_are_zero_padded() {
        let instant = Utc.timestamp_opt(42, 0).unwrap();
        assert_eq!(ulr_at(&IdFormat::default(), 1970, instant), "TC874970000000042F");
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let utc = generate_ulr(&IdFormat::default(), 2025, "2025-01-01T00:00:00Z").unwrap();
        let ist = generate_ulr(&IdFormat::default(), 2025, "2025-01-01T05:30:00+05:30").unwrap();
        assert_eq!(utc, ist);
    }

    #[test]
    fn pre_epoch_sequence_stays_positive() {
        let instant = Utc.timestamp_opt(-1, 0).unwrap();
        assert_eq!(ulr_at(&IdFormat::default(), 1969, instant), "TC874969999999999F");
    }

    #[test]
    fn malformed_timestamp_is_invalid() {
        let err = generate_ulr(&IdFormat::default(), 2025, "yesterday").unwrap_err();
        assert!(matches!(err, IdError::InvalidInput(_)));
    }
}
