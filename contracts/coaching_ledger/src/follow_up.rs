//! Weekly follow-up scheduling and history.

use crate::admin::require_admin;
use crate::calendar::{same_local_day, weekday_ordinal};
use crate::storage::{load_client, save_client};
use crate::subscription::require_activated;
use crate::types::{
    ClientRecord, Error, FollowUpDay, FollowUpEntry, FollowUpRecordedEvent, FollowUpSchedule,
    FollowUpStatus, LatestFollowUp,
};
use crate::validation::{require_non_blank, validate_text_len};
use soroban_sdk::{symbol_short, Env, String, Vec};

/// True when today (local time) is the client's follow-up weekday and nothing
/// has been recorded yet today.
///
/// Always false for a client without a follow-up day or not yet activated.
pub fn is_follow_up_due(record: &ClientRecord, now: u64, utc_offset_secs: i64) -> bool {
    let day = match record.follow_up_day() {
        Some(day) => day,
        None => return false,
    };
    if !record.is_activated() {
        return false;
    }
    if weekday_ordinal(now, utc_offset_secs) != day.ordinal() {
        return false;
    }
    !record
        .follow_up_history
        .iter()
        .any(|entry| same_local_day(entry.timestamp, now, utc_offset_secs))
}

/// Latest entry by timestamp; on equal timestamps the later-inserted entry wins.
pub fn latest_follow_up(history: &Vec<FollowUpEntry>) -> Option<FollowUpEntry> {
    let mut latest: Option<FollowUpEntry> = None;
    for entry in history.iter() {
        let replace = match &latest {
            Some(current) => entry.timestamp >= current.timestamp,
            None => true,
        };
        if replace {
            latest = Some(entry);
        }
    }
    latest
}

pub fn follow_up_status(record: &ClientRecord) -> FollowUpStatus {
    match latest_follow_up(&record.follow_up_history) {
        Some(entry) => FollowUpStatus {
            is_done: entry.done,
            latest: LatestFollowUp::Entry(entry),
        },
        None => FollowUpStatus {
            is_done: false,
            latest: LatestFollowUp::Empty,
        },
    }
}

/// Interactive "mark done" rule: notes are mandatory when `done` is set.
pub fn validate_manual_entry(done: bool, notes: &String) -> Result<(), Error> {
    if done {
        require_non_blank(notes, Error::MissingNotes)?;
    }
    Ok(())
}

fn append_entry(
    env: &Env,
    record: &mut ClientRecord,
    follow_up_day: FollowUpDay,
    done: bool,
    notes: String,
) -> Result<(), Error> {
    if record.follow_up_day().is_none() {
        return Err(Error::MissingFollowUpDay);
    }
    validate_text_len(&notes)?;
    record.follow_up_history.push_back(FollowUpEntry {
        timestamp: env.ledger().timestamp(),
        follow_up_day,
        done,
        notes,
    });
    Ok(())
}

fn publish_recorded(env: &Env, code: u64, follow_up_day: FollowUpDay, done: bool) {
    env.events().publish(
        (symbol_short!("followup"), code),
        FollowUpRecordedEvent {
            code,
            follow_up_day,
            done,
        },
    );
}

/// Appends an entry at the current time. Notes are stored as given; the
/// notes-required rule applies only to [`do_mark_follow_up_done`].
pub fn do_record_follow_up(
    env: &Env,
    code: u64,
    follow_up_day: FollowUpDay,
    done: bool,
    notes: String,
) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    append_entry(env, &mut record, follow_up_day, done, notes)?;

    save_client(env, &record);
    publish_recorded(env, code, follow_up_day, done);
    Ok(())
}

/// Marks today's follow-up as done against the client's configured day.
pub fn do_mark_follow_up_done(env: &Env, code: u64, notes: String) -> Result<(), Error> {
    require_admin(env)?;
    validate_manual_entry(true, &notes)?;

    let mut record = load_client(env, code)?;
    let day = record.follow_up_day().ok_or(Error::MissingFollowUpDay)?;
    append_entry(env, &mut record, day, true, notes)?;

    save_client(env, &record);
    publish_recorded(env, code, day, true);
    Ok(())
}

pub fn do_set_follow_up_day(env: &Env, code: u64, follow_up_day: FollowUpDay) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    require_activated(&record)?;
    record.follow_up_schedule = FollowUpSchedule::Weekly(follow_up_day);

    save_client(env, &record);
    env.events()
        .publish((symbol_short!("fu_day"), code), follow_up_day);
    Ok(())
}
