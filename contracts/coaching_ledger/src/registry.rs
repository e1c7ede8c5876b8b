//! Client registry: create clients and record progress measurements.

use crate::admin::require_admin;
use crate::storage::{insert_client, load_client, next_code, save_client};
use crate::types::{
    ClientCreatedEvent, ClientRecord, ClientStatus, Error, FollowUpSchedule, OnboardingState,
    ProgressEntry,
};
use crate::validation::{normalize_mobile_number, require_non_blank, validate_text_len};
use soroban_sdk::{symbol_short, Env, String, Vec};

/// Creates a client in the given onboarding state and returns its code.
pub fn do_create_client(
    env: &Env,
    name: String,
    mobile_number: String,
    notes: String,
    onboarding_state: OnboardingState,
) -> Result<u64, Error> {
    require_admin(env)?;
    require_non_blank(&name, Error::InvalidName)?;
    let mobile_number = normalize_mobile_number(env, &mobile_number)?;
    validate_text_len(&notes)?;

    let code = next_code(env)?;
    let record = ClientRecord {
        code,
        name,
        mobile_number,
        notes,
        onboarding_state,
        activated_at: None,
        status: ClientStatus::Active,
        subscriptions: Vec::new(env),
        pause_entries: Vec::new(env),
        total_paused_secs: 0,
        follow_up_schedule: FollowUpSchedule::Unset,
        follow_up_history: Vec::new(env),
        progress: Vec::new(env),
        created_at: env.ledger().timestamp(),
    };
    insert_client(env, &record);

    env.events().publish(
        (symbol_short!("created"), code),
        ClientCreatedEvent {
            code,
            onboarding_state,
        },
    );
    Ok(code)
}

/// Appends a measurement snapshot taken now. Weight must be positive; a zero
/// circumference means "not measured".
#[allow(clippy::too_many_arguments)]
pub fn do_add_progress(
    env: &Env,
    code: u64,
    weight_g: u32,
    neck_mm: u32,
    chest_mm: u32,
    waist_mm: u32,
    hips_mm: u32,
    thigh_mm: u32,
) -> Result<(), Error> {
    require_admin(env)?;
    if weight_g == 0 {
        return Err(Error::InvalidMeasurement);
    }

    let mut record = load_client(env, code)?;
    let timestamp = env.ledger().timestamp();
    record.progress.push_back(ProgressEntry {
        timestamp,
        weight_g,
        neck_mm,
        chest_mm,
        waist_mm,
        hips_mm,
        thigh_mm,
    });

    save_client(env, &record);
    env.events()
        .publish((symbol_short!("progress"), code), (weight_g, timestamp));
    Ok(())
}
