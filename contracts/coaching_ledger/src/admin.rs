//! Admin and config: init, admin rotation, expiring window, UTC offset.
//!
//! **PRs that only change admin or configuration behavior should edit this file only.**

use crate::calendar::{MAX_UTC_OFFSET_MINUTES, SECS_PER_DAY};
use crate::storage::bump_instance;
use crate::types::{DataKey, Error, LifecycleConfig};
use soroban_sdk::{symbol_short, Address, Env};

/// Days before the current period ends during which a client shows as
/// `Expiring`. Every consumer reads the window through [`expiring_window_secs`].
pub const DEFAULT_EXPIRING_WINDOW_DAYS: u32 = 10;

/// Stores the admin and the initial configuration. The expiring window
/// starts at [`DEFAULT_EXPIRING_WINDOW_DAYS`].
pub fn do_init(env: &Env, admin: Address, utc_offset_minutes: i32) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::AlreadyInitialized);
    }
    validate_utc_offset(utc_offset_minutes)?;

    env.storage().instance().set(&DataKey::Admin, &admin);
    env.storage().instance().set(
        &DataKey::Config,
        &LifecycleConfig {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
            utc_offset_minutes,
        },
    );
    env.storage().instance().set(&DataKey::NextCode, &1u64);
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotFound)
}

/// Loads the stored admin (the coach) and requires its authorization.
pub fn require_admin(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    let admin = get_admin(env)?;
    admin.require_auth();
    Ok(admin)
}

fn require_caller_is_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let stored = get_admin(env)?;
    if *caller != stored {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn do_rotate_admin(env: &Env, current_admin: Address, new_admin: Address) -> Result<(), Error> {
    require_caller_is_admin(env, &current_admin)?;
    env.storage().instance().set(&DataKey::Admin, &new_admin);
    env.events().publish(
        (symbol_short!("admin_rot"), current_admin.clone()),
        (current_admin, new_admin, env.ledger().timestamp()),
    );
    Ok(())
}

pub fn get_config(env: &Env) -> Result<LifecycleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotFound)
}

pub fn do_set_expiring_window(env: &Env, admin: Address, days: u32) -> Result<(), Error> {
    require_caller_is_admin(env, &admin)?;
    let mut config = get_config(env)?;
    config.expiring_window_days = days;
    save_config(env, &config);
    Ok(())
}

pub fn do_set_utc_offset(env: &Env, admin: Address, utc_offset_minutes: i32) -> Result<(), Error> {
    require_caller_is_admin(env, &admin)?;
    validate_utc_offset(utc_offset_minutes)?;
    let mut config = get_config(env)?;
    config.utc_offset_minutes = utc_offset_minutes;
    save_config(env, &config);
    Ok(())
}

fn save_config(env: &Env, config: &LifecycleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    env.events().publish(
        (symbol_short!("config"),),
        (config.expiring_window_days, config.utc_offset_minutes),
    );
}

fn validate_utc_offset(minutes: i32) -> Result<(), Error> {
    if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

/// The expiring window in seconds.
pub fn expiring_window_secs(config: &LifecycleConfig) -> u64 {
    u64::from(config.expiring_window_days) * SECS_PER_DAY
}

pub fn utc_offset_secs(config: &LifecycleConfig) -> i64 {
    i64::from(config.utc_offset_minutes) * 60
}
