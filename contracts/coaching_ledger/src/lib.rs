#![no_std]

//! Coaching ledger: lifecycle of fitness-coaching client records.
//!
//! Clients are onboarded (`Half` or `Full`), activated into a paid plan,
//! paused and resumed, expired, renewed and followed up weekly. Status is
//! never stored: every read re-derives a [`DisplayStatus`] from the record and
//! the ledger timestamp.
//!
//! Entrypoints here only delegate; the rules live in the modules below.

mod admin;
mod calendar;
mod follow_up;
mod onboarding;
mod pause;
mod queries;
mod registry;
mod renewal;
mod status;
mod storage;
mod subscription;
mod types;
mod validation;

pub use admin::DEFAULT_EXPIRING_WINDOW_DAYS;
pub use calendar::{month_bounds, weekday_ordinal, SECS_PER_DAY};
pub use follow_up::{is_follow_up_due, latest_follow_up, validate_manual_entry};
pub use onboarding::{can_transition, get_allowed_transitions, validate_onboarding_transition};
pub use pause::{apply_pause, apply_resume};
pub use renewal::{is_renewal_opportunity, MonthWindow};
pub use queries::status_matches;
pub use status::resolve_status;
pub use storage::MAX_PAGE_SIZE;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

#[contract]
pub struct CoachingLedger;

#[contractimpl]
impl CoachingLedger {
    /// Initialize the contract: set the coach (admin) and the UTC offset used
    /// for calendar days. The expiring window starts at
    /// [`DEFAULT_EXPIRING_WINDOW_DAYS`].
    pub fn init(env: Env, admin: Address, utc_offset_minutes: i32) -> Result<(), Error> {
        admin::do_init(&env, admin, utc_offset_minutes)
    }

    /// Rotate admin to a new address. Only callable by the current admin.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Admin rotation successful
    /// * `Err(Error::Unauthorized)` - Caller is not current admin
    /// * `Err(Error::NotFound)` - Admin not configured
    pub fn rotate_admin(env: Env, current_admin: Address, new_admin: Address) -> Result<(), Error> {
        admin::do_rotate_admin(&env, current_admin, new_admin)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        admin::get_admin(&env)
    }

    /// Change the expiring window (in days). Only callable by admin.
    pub fn set_expiring_window(env: Env, admin: Address, days: u32) -> Result<(), Error> {
        admin::do_set_expiring_window(&env, admin, days)
    }

    /// Change the UTC offset (in minutes, within ±14h). Only callable by admin.
    pub fn set_utc_offset(env: Env, admin: Address, utc_offset_minutes: i32) -> Result<(), Error> {
        admin::do_set_utc_offset(&env, admin, utc_offset_minutes)
    }

    pub fn get_config(env: Env) -> Result<LifecycleConfig, Error> {
        admin::get_config(&env)
    }

    // ── Registry ────────────────────────────────────────────────────────────

    /// Create a client and return its code (sequential, starting at 1).
    pub fn create_client(
        env: Env,
        name: String,
        mobile_number: String,
        notes: String,
        onboarding_state: OnboardingState,
    ) -> Result<u64, Error> {
        registry::do_create_client(&env, name, mobile_number, notes, onboarding_state)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_progress(
        env: Env,
        code: u64,
        weight_g: u32,
        neck_mm: u32,
        chest_mm: u32,
        waist_mm: u32,
        hips_mm: u32,
        thigh_mm: u32,
    ) -> Result<(), Error> {
        registry::do_add_progress(
            &env, code, weight_g, neck_mm, chest_mm, waist_mm, hips_mm, thigh_mm,
        )
    }

    // ── Onboarding ──────────────────────────────────────────────────────────

    /// Convert a `Half` client to `Full`.
    ///
    /// # State Transitions
    /// Allowed from: `Half` (and `Full`, as a no-op) while not activated.
    /// Fails with `InvalidTransition` once the client is activated.
    pub fn convert_to_full(env: Env, code: u64) -> Result<(), Error> {
        onboarding::do_convert_to_full(&env, code)
    }

    /// Direct onboarding state change; `Full -> Half` is rejected.
    pub fn update_onboarding_state(env: Env, code: u64, state: OnboardingState) -> Result<(), Error> {
        onboarding::do_update_onboarding_state(&env, code, state)
    }

    // ── Subscription ledger ─────────────────────────────────────────────────

    /// Create the first subscription period and set the follow-up day.
    ///
    /// Requires a `Full`, not-yet-activated client (`ActivationBlocked`
    /// otherwise) and `plan_duration_days >= 1` (`InvalidDuration`).
    pub fn activate(
        env: Env,
        code: u64,
        plan_duration_days: u32,
        extra_days: u32,
        start_date: u64,
        follow_up_day: FollowUpDay,
    ) -> Result<(), Error> {
        subscription::do_activate(
            &env,
            code,
            plan_duration_days,
            extra_days,
            start_date,
            follow_up_day,
        )
    }

    /// Append a new period, which becomes current.
    pub fn renew(
        env: Env,
        code: u64,
        plan_duration_days: u32,
        extra_days: u32,
        start_date: u64,
    ) -> Result<(), Error> {
        subscription::do_renew(&env, code, plan_duration_days, extra_days, start_date)
    }

    /// End the current period at the ledger timestamp. Irreversible.
    pub fn expire_immediately(env: Env, code: u64) -> Result<(), Error> {
        subscription::do_expire_immediately(&env, code)
    }

    // ── Pause / resume ──────────────────────────────────────────────────────

    /// Pause an active client for a committed number of days.
    ///
    /// # State Transitions
    /// Allowed from: raw status `Active`, activated.
    /// - Transitions to: `Paused`
    pub fn pause(env: Env, code: u64, duration_days: u32, reason: String) -> Result<(), Error> {
        pause::do_pause(&env, code, duration_days, reason)
    }

    /// Resume a paused client, extending the current period by the committed
    /// pause duration.
    ///
    /// # State Transitions
    /// Allowed from: `Paused` with an open pause record (`NotPaused` otherwise).
    /// - Transitions to: `Active`
    pub fn resume(env: Env, code: u64) -> Result<(), Error> {
        pause::do_resume(&env, code)
    }

    // ── Follow-ups ──────────────────────────────────────────────────────────

    pub fn record_follow_up(
        env: Env,
        code: u64,
        follow_up_day: FollowUpDay,
        done: bool,
        notes: String,
    ) -> Result<(), Error> {
        follow_up::do_record_follow_up(&env, code, follow_up_day, done, notes)
    }

    /// Record today's follow-up as done; notes are required.
    pub fn mark_follow_up_done(env: Env, code: u64, notes: String) -> Result<(), Error> {
        follow_up::do_mark_follow_up_done(&env, code, notes)
    }

    pub fn set_follow_up_day(env: Env, code: u64, follow_up_day: FollowUpDay) -> Result<(), Error> {
        follow_up::do_set_follow_up_day(&env, code, follow_up_day)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Read the full client record (for indexing and UI).
    pub fn get_client(env: Env, code: u64) -> Result<ClientRecord, Error> {
        storage::load_client(&env, code)
    }

    pub fn get_client_summary(env: Env, code: u64) -> Result<ClientSummary, Error> {
        let record = storage::load_client(&env, code)?;
        Ok(ClientSummary::of(&record))
    }

    pub fn list_client_summaries(env: Env, start: u32, limit: u32) -> Vec<ClientSummary> {
        queries::list_client_summaries(&env, start, limit)
    }

    pub fn get_client_count(env: Env) -> u32 {
        queries::get_client_count(&env)
    }

    pub fn get_display_status(env: Env, code: u64) -> Result<DisplayStatus, Error> {
        queries::get_display_status(&env, code)
    }

    pub fn is_follow_up_due(env: Env, code: u64) -> Result<bool, Error> {
        queries::get_is_follow_up_due(&env, code)
    }

    pub fn get_follow_up_status(env: Env, code: u64) -> Result<FollowUpStatus, Error> {
        let record = storage::load_client(&env, code)?;
        Ok(follow_up::follow_up_status(&record))
    }

    pub fn get_follow_up_history(env: Env, code: u64) -> Result<Vec<FollowUpEntry>, Error> {
        Ok(storage::load_client(&env, code)?.follow_up_history)
    }

    pub fn get_client_progress(env: Env, code: u64) -> Result<Vec<ProgressEntry>, Error> {
        Ok(storage::load_client(&env, code)?.progress)
    }

    /// Clients still onboarding in `state`, scanning index entries
    /// `[start, start + limit)`. Continue from `next_start` while `has_next`.
    pub fn get_clients_by_onboarding_state(
        env: Env,
        state: OnboardingState,
        start: u32,
        limit: u32,
    ) -> ClientPage {
        queries::get_clients_by_onboarding_state(&env, state, start, limit)
    }

    pub fn get_clients_by_follow_up_day(
        env: Env,
        day: FollowUpDay,
        start: u32,
        limit: u32,
    ) -> ClientPage {
        queries::get_clients_by_follow_up_day(&env, day, start, limit)
    }

    /// Clients whose resolved status is `status`. `Active` also lists
    /// expiring clients.
    pub fn get_clients_by_status(
        env: Env,
        status: DisplayStatus,
        start: u32,
        limit: u32,
    ) -> Result<ClientPage, Error> {
        queries::get_clients_by_status(&env, status, start, limit)
    }

    pub fn get_expiring_clients(env: Env, start: u32, limit: u32) -> Result<ClientPage, Error> {
        queries::get_expiring_clients(&env, start, limit)
    }

    /// Active clients whose current period ends in the given local month.
    pub fn get_renewal_opportunities(
        env: Env,
        year: u32,
        month: u32,
        start: u32,
        limit: u32,
    ) -> Result<ClientPage, Error> {
        queries::get_renewal_opportunities(&env, year, month, start, limit)
    }

    /// [`Self::get_renewal_opportunities`] for the month containing the ledger timestamp.
    pub fn get_renewals_this_month(env: Env, start: u32, limit: u32) -> Result<ClientPage, Error> {
        queries::get_renewal_opportunities_this_month(&env, start, limit)
    }

    /// Dashboard counts over index entries `[start, start + limit)`.
    pub fn get_client_metrics(env: Env, start: u32, limit: u32) -> Result<ClientMetrics, Error> {
        queries::get_client_metrics(&env, start, limit)
    }
}
