//! Read-only entrypoints and helpers: client views, filtered listings,
//! dashboard metrics.
//!
//! **PRs that only add or change read-only/query behavior should edit this file only.**
//!
//! Every query loads fresh snapshots and re-derives status; nothing derived is
//! ever written back. Queries that scan clients read one bounded window of the
//! creation-ordered index per call (see [`crate::storage::MAX_PAGE_SIZE`]).

use crate::admin::{expiring_window_secs, get_config, utc_offset_secs};
use crate::follow_up::is_follow_up_due;
use crate::renewal::{is_renewal_opportunity, renewal_opportunities, MonthWindow};
use crate::status::resolve_status;
use crate::storage::{client_codes, index_window, load_client, load_clients_window, IndexWindow};
use crate::types::{
    ClientMetrics, ClientPage, ClientRecord, ClientSummary, DisplayStatus, Error, FollowUpDay,
    OnboardingState,
};
use soroban_sdk::{Env, Vec};

pub fn get_display_status(env: &Env, code: u64) -> Result<DisplayStatus, Error> {
    let config = get_config(env)?;
    let record = load_client(env, code)?;
    Ok(resolve_status(
        &record,
        env.ledger().timestamp(),
        expiring_window_secs(&config),
    ))
}

pub fn get_is_follow_up_due(env: &Env, code: u64) -> Result<bool, Error> {
    let config = get_config(env)?;
    let record = load_client(env, code)?;
    Ok(is_follow_up_due(
        &record,
        env.ledger().timestamp(),
        utc_offset_secs(&config),
    ))
}

/// Returns client summaries, paginated by offset.
///
/// * `start` – 0-based offset into the creation-ordered client list.
/// * `limit` – maximum number of summaries to return, capped at
///   [`crate::storage::MAX_PAGE_SIZE`].
///
/// Returns an empty `Vec` when `start` is beyond the end or `limit` is 0.
pub fn list_client_summaries(env: &Env, start: u32, limit: u32) -> Vec<ClientSummary> {
    let window = index_window(env, start, limit);
    let mut result = Vec::new(env);
    for record in load_clients_window(env, &window).iter() {
        result.push_back(ClientSummary::of(&record));
    }
    result
}

pub fn get_client_count(env: &Env) -> u32 {
    client_codes(env).len()
}

fn page_of(records: Vec<ClientRecord>, window: &IndexWindow) -> ClientPage {
    ClientPage {
        clients: records,
        next_start: window.end,
        has_next: window.has_next,
    }
}

/// Scans index entries `[start, start + limit)` and keeps the matching
/// records. A page may hold fewer than `limit` clients (or none) while
/// `has_next` is still true.
fn filter_clients<F>(env: &Env, start: u32, limit: u32, mut keep: F) -> ClientPage
where
    F: FnMut(&ClientRecord) -> bool,
{
    let window = index_window(env, start, limit);
    let mut matches = Vec::new(env);
    for record in load_clients_window(env, &window).iter() {
        if keep(&record) {
            matches.push_back(record);
        }
    }
    page_of(matches, &window)
}

/// Clients still in onboarding (not activated) in the given state.
pub fn get_clients_by_onboarding_state(
    env: &Env,
    state: OnboardingState,
    start: u32,
    limit: u32,
) -> ClientPage {
    filter_clients(env, start, limit, |record| {
        !record.is_activated() && record.onboarding_state == state
    })
}

/// Activated clients followed up on `day`.
pub fn get_clients_by_follow_up_day(
    env: &Env,
    day: FollowUpDay,
    start: u32,
    limit: u32,
) -> ClientPage {
    filter_clients(env, start, limit, |record| {
        record.is_activated() && record.follow_up_day() == Some(day)
    })
}

/// Whether a resolved status belongs to the requested listing.
///
/// `Active` lists every activated client that is neither paused nor expired,
/// so expiring clients appear under both `Active` and `Expiring`.
pub fn status_matches(resolved: &DisplayStatus, wanted: &DisplayStatus) -> bool {
    match wanted {
        DisplayStatus::Active => {
            matches!(resolved, DisplayStatus::Active | DisplayStatus::Expiring)
        }
        _ => resolved == wanted,
    }
}

pub fn get_clients_by_status(
    env: &Env,
    status: DisplayStatus,
    start: u32,
    limit: u32,
) -> Result<ClientPage, Error> {
    let config = get_config(env)?;
    let now = env.ledger().timestamp();
    let window = expiring_window_secs(&config);
    Ok(filter_clients(env, start, limit, |record| {
        status_matches(&resolve_status(record, now, window), &status)
    }))
}

/// Clients whose resolved status is `Expiring`.
pub fn get_expiring_clients(env: &Env, start: u32, limit: u32) -> Result<ClientPage, Error> {
    get_clients_by_status(env, DisplayStatus::Expiring, start, limit)
}

fn renewal_page(
    env: &Env,
    month: &MonthWindow,
    start: u32,
    limit: u32,
    expiring_window: u64,
) -> ClientPage {
    let window = index_window(env, start, limit);
    let matches = renewal_opportunities(
        env,
        &load_clients_window(env, &window),
        month,
        env.ledger().timestamp(),
        expiring_window,
    );
    page_of(matches, &window)
}

pub fn get_renewal_opportunities(
    env: &Env,
    year: u32,
    month: u32,
    start: u32,
    limit: u32,
) -> Result<ClientPage, Error> {
    let config = get_config(env)?;
    let month = MonthWindow::new(i64::from(year), month, utc_offset_secs(&config))?;
    Ok(renewal_page(
        env,
        &month,
        start,
        limit,
        expiring_window_secs(&config),
    ))
}

pub fn get_renewal_opportunities_this_month(
    env: &Env,
    start: u32,
    limit: u32,
) -> Result<ClientPage, Error> {
    let config = get_config(env)?;
    let month = MonthWindow::containing(env.ledger().timestamp(), utc_offset_secs(&config))?;
    Ok(renewal_page(
        env,
        &month,
        start,
        limit,
        expiring_window_secs(&config),
    ))
}

/// Dashboard counts over index entries `[start, start + limit)`.
///
/// Onboarding clients only count towards `total` and `onboarding`.
/// `active` includes expiring clients, mirroring how the dashboard groups
/// "still on a plan". Contract-wide figures are the sum over pages up to
/// [`get_client_count`].
pub fn get_client_metrics(env: &Env, start: u32, limit: u32) -> Result<ClientMetrics, Error> {
    let config = get_config(env)?;
    let now = env.ledger().timestamp();
    let window = expiring_window_secs(&config);
    let offset = utc_offset_secs(&config);
    let this_month = MonthWindow::containing(now, offset)?;

    let mut metrics = ClientMetrics::default();
    let page = index_window(env, start, limit);
    for record in load_clients_window(env, &page).iter() {
        metrics.total += 1;
        match resolve_status(&record, now, window) {
            DisplayStatus::Onboarded(_) => metrics.onboarding += 1,
            DisplayStatus::Active => metrics.active += 1,
            DisplayStatus::Expiring => {
                metrics.active += 1;
                metrics.expiring += 1;
            }
            DisplayStatus::Paused => metrics.paused += 1,
            DisplayStatus::Expired => metrics.expired += 1,
        }
        if is_follow_up_due(&record, now, offset) {
            metrics.follow_ups_due += 1;
        }
        if is_renewal_opportunity(&record, &this_month, now, window) {
            metrics.renewals_this_month += 1;
        }
    }
    Ok(metrics)
}
