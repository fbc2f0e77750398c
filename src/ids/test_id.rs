//! Test identifiers of the form `PREFIX/YY/MM/T_<n>`.

use chrono::{DateTime, TimeZone};

use super::{IdError, IdFormat, Period};

/// Builds the next test ID for the calendar month of `now`, read in the
/// offset `now` carries.
///
/// `n` is `existing_test_count + 1`.
///
/// # Errors
///
/// Returns [`IdError::InvalidInput`] if the count would overflow.
pub fn generate_test_id<Tz: TimeZone>(
    format: &IdFormat,
    existing_test_count: u64,
    now: DateTime<Tz>,
) -> Result<String, IdError> {
    test_id_for_period(format, existing_test_count, Period::of(now))
}

/// Builds the next test ID inside an explicit period.
///
/// # Errors
///
/// Returns [`IdError::InvalidInput`] if the count would overflow.
pub fn test_id_for_period(
    format: &IdFormat,
    existing_test_count: u64,
    period: Period,
) -> Result<String, IdError> {
    let next = existing_test_count
        .checked_add(1)
        .ok_or_else(|| IdError::invalid("existing test count overflows"))?;
    Ok(format!("{}/{}/{}/T_{next}", format.prefix, period.yy(), period.mm()))
}
