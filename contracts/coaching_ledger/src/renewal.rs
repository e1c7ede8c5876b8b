//! Renewal opportunity finder: active clients whose current period ends
//! inside a given calendar month.

use crate::calendar::{local_year_month, month_bounds};
use crate::status::resolve_status;
use crate::types::{ClientRecord, DisplayStatus, Error};
use soroban_sdk::{Env, Vec};

/// Inclusive bounds of one local calendar month, in UTC seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthWindow {
    pub start: u64,
    pub end: u64,
}

impl MonthWindow {
    /// # Errors
    /// * `InvalidMonth` - `month` outside 1-12 or before the epoch.
    pub fn new(year: i64, month: u32, utc_offset_secs: i64) -> Result<Self, Error> {
        let (start, end) = month_bounds(year, month, utc_offset_secs)?;
        Ok(MonthWindow { start, end })
    }

    /// The local month containing `now`.
    pub fn containing(now: u64, utc_offset_secs: i64) -> Result<Self, Error> {
        let (year, month) = local_year_month(now, utc_offset_secs);
        Self::new(year, month, utc_offset_secs)
    }

    pub fn contains(&self, timestamp: u64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Whether one record is a renewal opportunity for `month`: activated,
/// resolved status exactly `Active` (not paused, expiring or expired), and the
/// current period ends inside the month.
pub fn is_renewal_opportunity(
    record: &ClientRecord,
    month: &MonthWindow,
    now: u64,
    expiring_window_secs: u64,
) -> bool {
    if !record.is_activated() {
        return false;
    }
    if resolve_status(record, now, expiring_window_secs) != DisplayStatus::Active {
        return false;
    }
    match record.current_end_date() {
        Some(end_date) => month.contains(end_date),
        None => false,
    }
}

/// Filters `records`, preserving their order.
pub fn renewal_opportunities(
    env: &Env,
    records: &Vec<ClientRecord>,
    month: &MonthWindow,
    now: u64,
    expiring_window_secs: u64,
) -> Vec<ClientRecord> {
    let mut matches = Vec::new(env);
    for record in records.iter() {
        if is_renewal_opportunity(&record, month, now, expiring_window_secs) {
            matches.push_back(record);
        }
    }
    matches
}
