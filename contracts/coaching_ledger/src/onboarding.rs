//! Onboarding state machine and transition validation.
//!
//! Kept in a separate module so PRs touching onboarding rules do not conflict
//! with PRs touching the subscription ledger or follow-ups.

use crate::admin::require_admin;
use crate::storage::{load_client, save_client};
use crate::types::{ClientRecord, Error, OnboardingChangedEvent, OnboardingState};
use soroban_sdk::{symbol_short, Env};

/// Validates an onboarding state change for a client that is not yet activated.
///
/// # Transition Rules
///
/// | From | To   | Allowed          |
/// |------|------|------------------|
/// | Half | Full | Yes              |
/// | Full | Half | No               |
/// | any  | same | Yes (idempotent) |
///
/// Activation freezes the state; see [`validate_record_transition`].
pub fn validate_onboarding_transition(
    from: &OnboardingState,
    to: &OnboardingState,
) -> Result<(), Error> {
    if from == to {
        return Ok(());
    }

    let valid = match from {
        OnboardingState::Half => matches!(to, OnboardingState::Full),
        OnboardingState::Full => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidTransition)
    }
}

/// Returns all valid target states for a given current state.
pub fn get_allowed_transitions(state: &OnboardingState) -> &'static [OnboardingState] {
    match state {
        OnboardingState::Half => &[OnboardingState::Full],
        OnboardingState::Full => &[],
    }
}

/// Boolean form of [`validate_onboarding_transition`].
pub fn can_transition(from: &OnboardingState, to: &OnboardingState) -> bool {
    validate_onboarding_transition(from, to).is_ok()
}

/// Validates a change against a whole record: any change, including a
/// same-state one, is rejected once the client is activated.
pub fn validate_record_transition(record: &ClientRecord, to: &OnboardingState) -> Result<(), Error> {
    if record.is_activated() {
        return Err(Error::InvalidTransition);
    }
    validate_onboarding_transition(&record.onboarding_state, to)
}

/// Activation requires a fully onboarded, not-yet-activated client.
pub fn validate_activation(record: &ClientRecord) -> Result<(), Error> {
    if record.is_activated() || record.onboarding_state != OnboardingState::Full {
        return Err(Error::ActivationBlocked);
    }
    Ok(())
}

pub fn do_update_onboarding_state(env: &Env, code: u64, to: OnboardingState) -> Result<(), Error> {
    require_admin(env)?;

    let mut record = load_client(env, code)?;
    validate_record_transition(&record, &to)?;
    let from = record.onboarding_state;
    if from == to {
        return Ok(());
    }
    record.onboarding_state = to;

    save_client(env, &record);
    env.events().publish(
        (symbol_short!("convert"), code),
        OnboardingChangedEvent { code, from, to },
    );
    Ok(())
}

pub fn do_convert_to_full(env: &Env, code: u64) -> Result<(), Error> {
    do_update_onboarding_state(env, code, OnboardingState::Full)
}
