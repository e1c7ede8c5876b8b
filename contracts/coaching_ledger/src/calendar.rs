//! Day, weekday and month arithmetic over ledger timestamps.
//!
//! Timestamps are `u64` seconds since the Unix epoch (UTC). Calendar
//! questions (which day, which weekday, which month) are answered in the
//! coach's local time, given as an offset from UTC in seconds. All arithmetic
//! is checked; overflow is reported as [`Error::Overflow`] instead of
//! panicking.

use crate::types::Error;

pub const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_DAY_I64: i64 = 86_400;

/// Largest accepted UTC offset, in minutes (UTC-14:00 to UTC+14:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Converts a number of days to seconds.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(days_to_secs(1), Ok(86_400));
/// ```
pub fn days_to_secs(days: u32) -> Result<u64, Error> {
    u64::from(days)
        .checked_mul(SECS_PER_DAY)
        .ok_or(Error::Overflow)
}

/// Returns `timestamp` moved forward by `days` whole days.
pub fn add_days(timestamp: u64, days: u32) -> Result<u64, Error> {
    timestamp
        .checked_add(days_to_secs(days)?)
        .ok_or(Error::Overflow)
}

/// End of a plan period: `start + plan_duration_days + extra_days`.
pub fn plan_end_date(start_date: u64, plan_duration_days: u32, extra_days: u32) -> Result<u64, Error> {
    let total_days = plan_duration_days
        .checked_add(extra_days)
        .ok_or(Error::Overflow)?;
    add_days(start_date, total_days)
}

fn to_local_secs(timestamp: u64, utc_offset_secs: i64) -> i64 {
    // Timestamps beyond i64::MAX are far outside any ledger's lifetime.
    i64::try_from(timestamp)
        .unwrap_or(i64::MAX)
        .saturating_add(utc_offset_secs)
}

/// Local calendar day number (days since 1970-01-01 in local time).
pub fn local_day(timestamp: u64, utc_offset_secs: i64) -> i64 {
    to_local_secs(timestamp, utc_offset_secs).div_euclid(SECS_PER_DAY_I64)
}

/// Weekday ordinal of `timestamp` in local time, Monday = 0 ... Sunday = 6.
///
/// 1970-01-01 was a Thursday (ordinal 3).
pub fn weekday_ordinal(timestamp: u64, utc_offset_secs: i64) -> u32 {
    // rem_euclid(7) is always in 0..7
    (local_day(timestamp, utc_offset_secs) + 3).rem_euclid(7) as u32
}

/// True when both timestamps fall on the same local calendar day.
pub fn same_local_day(a: u64, b: u64, utc_offset_secs: i64) -> bool {
    local_day(a, utc_offset_secs) == local_day(b, utc_offset_secs)
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let day = i64::from(day);
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`]: `(year, month, day)` for a day number.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Local `(year, month)` containing `timestamp`.
pub fn local_year_month(timestamp: u64, utc_offset_secs: i64) -> (i64, u32) {
    let (year, month, _) = civil_from_days(local_day(timestamp, utc_offset_secs));
    (year, month)
}

/// Inclusive `[start, end]` bounds of a local calendar month, in UTC seconds.
///
/// `start` is the first second of the month's first day and `end` the last
/// second of its last day.
///
/// # Errors
///
/// * [`Error::InvalidMonth`] - `month` outside 1-12, or the month ends
///   before the epoch. A month that straddles the epoch is clamped to start
///   at 0.
/// * [`Error::Overflow`] - the bounds do not fit in a `u64` timestamp.
pub fn month_bounds(year: i64, month: u32, utc_offset_secs: i64) -> Result<(u64, u64), Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth);
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1).ok_or(Error::Overflow)?, 1)
    } else {
        (year, month + 1)
    };

    let start_local = days_from_civil(year, month, 1)
        .checked_mul(SECS_PER_DAY_I64)
        .ok_or(Error::Overflow)?;
    let next_local = days_from_civil(next_year, next_month, 1)
        .checked_mul(SECS_PER_DAY_I64)
        .ok_or(Error::Overflow)?;

    let start = start_local
        .checked_sub(utc_offset_secs)
        .ok_or(Error::Overflow)?;
    let end = next_local
        .checked_sub(utc_offset_secs)
        .and_then(|s| s.checked_sub(1))
        .ok_or(Error::Overflow)?;

    // A month straddling the epoch starts at 0; one wholly before it is invalid.
    let end = u64::try_from(end).map_err(|_| Error::InvalidMonth)?;
    let start = u64::try_from(start.max(0)).map_err(|_| Error::InvalidMonth)?;
    Ok((start, end))
}
