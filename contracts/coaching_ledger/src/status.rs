//! Status resolver: derives a [`DisplayStatus`] from a record snapshot and the
//! current time. Nothing here reads or writes storage.

use crate::types::{ClientRecord, ClientStatus, DisplayStatus};

/// Resolves what a client is "in" at `now`.
///
/// Evaluated in priority order, first match wins:
///
/// 1. not activated: `Onboarded(onboarding_state)`
/// 2. raw status `Paused`: `Paused`, even when the frozen end date has passed
/// 3. current `end_date <= now`: `Expired`
/// 4. `end_date - now <= expiring_window_secs`: `Expiring`
/// 5. otherwise `Active`
///
/// An activated record without any period (which the ledger never produces)
/// resolves to `Active`.
pub fn resolve_status(record: &ClientRecord, now: u64, expiring_window_secs: u64) -> DisplayStatus {
    if !record.is_activated() {
        return DisplayStatus::Onboarded(record.onboarding_state);
    }

    match record.status {
        ClientStatus::Paused => DisplayStatus::Paused,
        ClientStatus::Active => match record.current_end_date() {
            None => DisplayStatus::Active,
            Some(end_date) => status_for_end_date(end_date, now, expiring_window_secs),
        },
    }
}

/// Time-derived part of the resolution for an active, activated client.
pub fn status_for_end_date(end_date: u64, now: u64, expiring_window_secs: u64) -> DisplayStatus {
    if end_date <= now {
        DisplayStatus::Expired
    } else if end_date - now <= expiring_window_secs {
        DisplayStatus::Expiring
    } else {
        DisplayStatus::Active
    }
}
