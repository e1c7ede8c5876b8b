//! Subscription ledger: activate, renew, expire immediately.
//!
//! **PRs that only change plan periods or activation should edit this file only.**
//!
//! Periods are append-only. The current period is always the last one; only
//! its `end_date` is ever moved after creation (by resume or immediate expiry).

use crate::admin::require_admin;
use crate::calendar::plan_end_date;
use crate::onboarding::validate_activation;
use crate::storage::{load_client, save_client};
use crate::types::{
    ClientActivatedEvent, ClientExpiredEvent, ClientRecord, Error, FollowUpDay, FollowUpSchedule,
    SubscriptionPeriod, SubscriptionRenewedEvent,
};
use soroban_sdk::{symbol_short, Env};

/// Builds a new period ending `plan_duration_days + extra_days` after `start_date`.
pub fn new_period(
    plan_duration_days: u32,
    extra_days: u32,
    start_date: u64,
    created_at: u64,
) -> Result<SubscriptionPeriod, Error> {
    if plan_duration_days < 1 {
        return Err(Error::InvalidDuration);
    }
    Ok(SubscriptionPeriod {
        plan_duration_days,
        extra_days,
        start_date,
        end_date: plan_end_date(start_date, plan_duration_days, extra_days)?,
        created_at,
    })
}

pub fn require_activated(record: &ClientRecord) -> Result<(), Error> {
    if !record.is_activated() {
        return Err(Error::NotActivated);
    }
    Ok(())
}

/// Replaces the current period's `end_date`.
pub fn set_current_end_date(record: &mut ClientRecord, end_date: u64) -> Result<(), Error> {
    let last = record
        .subscriptions
        .len()
        .checked_sub(1)
        .ok_or(Error::NotActivated)?;
    let mut period = record.subscriptions.get(last).ok_or(Error::NotActivated)?;
    period.end_date = end_date;
    record.subscriptions.set(last, period);
    Ok(())
}

/// Creates the first subscription period and sets the follow-up day.
///
/// # Errors
/// * `ActivationBlocked` - client is `Half` or already activated.
/// * `InvalidDuration` - `plan_duration_days` is zero.
pub fn do_activate(
    env: &Env,
    code: u64,
    plan_duration_days: u32,
    extra_days: u32,
    start_date: u64,
    follow_up_day: FollowUpDay,
) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    validate_activation(&record)?;
    let period = new_period(
        plan_duration_days,
        extra_days,
        start_date,
        env.ledger().timestamp(),
    )?;
    let end_date = period.end_date;

    record.subscriptions.push_back(period);
    record.activated_at = Some(start_date);
    record.follow_up_schedule = FollowUpSchedule::Weekly(follow_up_day);

    save_client(env, &record);
    env.events().publish(
        (symbol_short!("activated"), code),
        ClientActivatedEvent {
            code,
            start_date,
            end_date,
            follow_up_day,
        },
    );
    Ok(())
}

/// Appends a fresh period, which becomes current. The new start date is not
/// tied to the previous period's end; overlaps and gaps are allowed.
pub fn do_renew(
    env: &Env,
    code: u64,
    plan_duration_days: u32,
    extra_days: u32,
    start_date: u64,
) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    require_activated(&record)?;
    let period = new_period(
        plan_duration_days,
        extra_days,
        start_date,
        env.ledger().timestamp(),
    )?;
    let end_date = period.end_date;
    record.subscriptions.push_back(period);

    save_client(env, &record);
    env.events().publish(
        (symbol_short!("renewed"), code),
        SubscriptionRenewedEvent {
            code,
            start_date,
            end_date,
            period_count: record.subscriptions.len(),
        },
    );
    Ok(())
}

/// Ends the current period now. There is no way back; a new period has to be
/// added with [`do_renew`].
pub fn do_expire_immediately(env: &Env, code: u64) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    require_activated(&record)?;
    let previous_end_date = record.current_end_date().ok_or(Error::NotActivated)?;
    let now = env.ledger().timestamp();
    set_current_end_date(&mut record, now)?;

    save_client(env, &record);
    env.events().publish(
        (symbol_short!("expired"), code),
        ClientExpiredEvent {
            code,
            previous_end_date,
            end_date: now,
        },
    );
    Ok(())
}
