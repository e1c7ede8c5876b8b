//! Pause/resume controller.
//!
//! The pause duration is committed when the pause is opened. Resuming extends
//! the current period by exactly that many days, however long the client was
//! actually paused.

use crate::admin::require_admin;
use crate::calendar::{add_days, days_to_secs};
use crate::storage::{load_client, save_client};
use crate::subscription::{require_activated, set_current_end_date};
use crate::types::{
    ClientPausedEvent, ClientRecord, ClientResumedEvent, ClientStatus, Error, PauseEntry,
};
use crate::validation::require_non_blank;
use soroban_sdk::{symbol_short, Env, String};

/// Opens a pause record on `record`. Pure apart from the record itself.
///
/// # Errors
/// * `NotActivated` - no subscription period yet.
/// * `AlreadyPaused` - raw status is `Paused` or an open record exists.
/// * `InvalidDuration` - `duration_days` is zero.
/// * `InvalidReason` - `reason` is blank.
pub fn apply_pause(
    record: &mut ClientRecord,
    duration_days: u32,
    reason: String,
    now: u64,
) -> Result<(), Error> {
    require_activated(record)?;
    if record.status == ClientStatus::Paused || record.open_pause_index().is_some() {
        return Err(Error::AlreadyPaused);
    }
    if duration_days < 1 {
        return Err(Error::InvalidDuration);
    }
    require_non_blank(&reason, Error::InvalidReason)?;

    record.pause_entries.push_back(PauseEntry {
        timestamp: now,
        duration_days,
        reason,
        resumed: false,
    });
    record.status = ClientStatus::Paused;
    Ok(())
}

/// Closes the open pause record and extends the current period by its
/// committed duration. Returns `(extended_days, new_end_date)`.
pub fn apply_resume(record: &mut ClientRecord) -> Result<(u32, u64), Error> {
    if record.status != ClientStatus::Paused {
        return Err(Error::NotPaused);
    }
    let index = record.open_pause_index().ok_or(Error::NotPaused)?;
    let mut entry = record.pause_entries.get(index).ok_or(Error::NotPaused)?;
    let days = entry.duration_days;

    let end_date = record.current_end_date().ok_or(Error::NotActivated)?;
    let new_end_date = add_days(end_date, days)?;
    let total_paused_secs = record
        .total_paused_secs
        .checked_add(days_to_secs(days)?)
        .ok_or(Error::Overflow)?;

    entry.resumed = true;
    record.pause_entries.set(index, entry);
    record.total_paused_secs = total_paused_secs;
    set_current_end_date(record, new_end_date)?;
    record.status = ClientStatus::Active;
    Ok((days, new_end_date))
}

pub fn do_pause(env: &Env, code: u64, duration_days: u32, reason: String) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    let now = env.ledger().timestamp();
    apply_pause(&mut record, duration_days, reason, now)?;

    save_client(env, &record);
    env.events().publish(
        (symbol_short!("paused"), code),
        ClientPausedEvent {
            code,
            duration_days,
            timestamp: now,
        },
    );
    Ok(())
}

pub fn do_resume(env: &Env, code: u64) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    let (extended_days, end_date) = apply_resume(&mut record)?;

    save_client(env, &record);
    env.events().publish(
        (symbol_short!("resumed"), code),
        ClientResumedEvent {
            code,
            extended_days,
            end_date,
        },
    );
    Ok(())
}
