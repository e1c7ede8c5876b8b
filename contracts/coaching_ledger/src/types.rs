//! Contract types: errors, client records and event payloads.
//!
//! Kept in a separate module to reduce merge conflicts when editing the
//! lifecycle rules or contract entrypoints.

use soroban_sdk::{contracterror, contracttype, String, Vec};

/// Storage keys.
///
/// `Admin`, `Config`, `NextCode` and `ClientCodes` live in instance storage;
/// `Client(code)` records live in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Config,
    NextCode,
    /// Insertion-ordered list of every client code.
    ClientCodes,
    Client(u64),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Onboarding state change after activation, or a reverse transition.
    InvalidTransition = 400,
    Unauthorized = 401,
    /// Checked time arithmetic overflowed.
    Overflow = 403,
    NotFound = 404,
    /// Activation attempted while `Half` or already activated.
    ActivationBlocked = 1001,
    AlreadyPaused = 1002,
    /// Resume attempted without an open pause record.
    NotPaused = 1003,
    /// Plan or pause duration below one day.
    InvalidDuration = 1004,
    /// Follow-up recorded for a client with no follow-up day.
    MissingFollowUpDay = 1005,
    /// Lifecycle action on a client that has no subscription period yet.
    NotActivated = 1006,
    InvalidReason = 1007,
    /// "Mark done" without follow-up notes.
    MissingNotes = 1008,
    InvalidMobileNumber = 1009,
    InvalidName = 1010,
    TextTooLong = 1011,
    /// Month outside 1-12 or a month starting before the epoch.
    InvalidMonth = 1012,
    InvalidMeasurement = 1013,
    InvalidConfig = 1014,
    AlreadyInitialized = 1015,
}

/// How much setup a not-yet-paying client has completed.
///
/// `Half -> Full` is the only legal transition, and only before activation.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OnboardingState {
    Half = 0,
    Full = 1,
}

/// The client's own toggle, independent of time-derived expiry.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClientStatus {
    Active = 0,
    Paused = 1,
}

/// Weekday a client is followed up on. Discriminants are the weekday
/// ordinal used by the scheduler (Monday = 0 ... Sunday = 6).
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FollowUpDay {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl FollowUpDay {
    pub const fn ordinal(self) -> u32 {
        self as u32
    }
}

/// Whether a client has a weekly follow-up day. Set on activation.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FollowUpSchedule {
    Unset,
    Weekly(FollowUpDay),
}

impl FollowUpSchedule {
    pub fn day(&self) -> Option<FollowUpDay> {
        match self {
            FollowUpSchedule::Unset => None,
            FollowUpSchedule::Weekly(day) => Some(*day),
        }
    }
}

/// What a client is "in" right now. Derived on every read, never stored.
///
/// # Resolution order
///
/// | Condition                                  | Status               |
/// |--------------------------------------------|----------------------|
/// | not activated                              | `Onboarded(state)`   |
/// | raw status is `Paused`                     | `Paused`             |
/// | current `end_date <= now`                  | `Expired`            |
/// | `end_date - now <= expiring window`        | `Expiring`           |
/// | otherwise                                  | `Active`             |
///
/// A paused client is never reported as expired: the pause extension is only
/// applied once the client resumes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DisplayStatus {
    Onboarded(OnboardingState),
    Active,
    Paused,
    Expiring,
    Expired,
}

/// One committed plan interval. Periods accumulate and are never edited once
/// superseded; only the current (last) period's `end_date` moves, on resume or
/// immediate expiry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionPeriod {
    pub plan_duration_days: u32,
    pub extra_days: u32,
    pub start_date: u64,
    pub end_date: u64,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEntry {
    /// When the pause began.
    pub timestamp: u64,
    /// Committed up front; the end-date extension applied on resume.
    pub duration_days: u32,
    pub reason: String,
    pub resumed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FollowUpEntry {
    pub timestamp: u64,
    /// The day this entry was recorded against.
    pub follow_up_day: FollowUpDay,
    pub done: bool,
    pub notes: String,
}

/// Body measurement snapshot, metric fixed-point.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgressEntry {
    pub timestamp: u64,
    pub weight_g: u32,
    pub neck_mm: u32,
    pub chest_mm: u32,
    pub waist_mm: u32,
    pub hips_mm: u32,
    pub thigh_mm: u32,
}

/// Full client record, the unit of lifecycle state.
///
/// `activated_at` is present exactly when `subscriptions` is non-empty, and
/// `onboarding_state` is frozen from then on. At most one entry of
/// `pause_entries` has `resumed == false`, and only while `status` is
/// `Paused`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientRecord {
    pub code: u64,
    pub name: String,
    pub mobile_number: String,
    pub notes: String,
    pub onboarding_state: OnboardingState,
    pub activated_at: Option<u64>,
    pub status: ClientStatus,
    pub subscriptions: Vec<SubscriptionPeriod>,
    pub pause_entries: Vec<PauseEntry>,
    pub total_paused_secs: u64,
    pub follow_up_schedule: FollowUpSchedule,
    pub follow_up_history: Vec<FollowUpEntry>,
    pub progress: Vec<ProgressEntry>,
    pub created_at: u64,
}

impl ClientRecord {
    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }

    /// The current subscription period (the last one appended).
    pub fn current_period(&self) -> Option<SubscriptionPeriod> {
        self.subscriptions.last()
    }

    pub fn current_end_date(&self) -> Option<u64> {
        self.current_period().map(|period| period.end_date)
    }

    pub fn follow_up_day(&self) -> Option<FollowUpDay> {
        self.follow_up_schedule.day()
    }

    /// Index of the open pause record, if any.
    pub fn open_pause_index(&self) -> Option<u32> {
        let mut i = self.pause_entries.len();
        while i > 0 {
            i -= 1;
            if let Some(entry) = self.pause_entries.get(i) {
                if !entry.resumed {
                    return Some(i);
                }
            }
        }
        None
    }
}

/// Lightweight projection for list and dashboard rendering.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientSummary {
    pub code: u64,
    pub name: String,
    pub mobile_number: String,
    pub onboarding_state: OnboardingState,
    pub activated_at: Option<u64>,
    pub status: ClientStatus,
    /// End date of the current subscription period.
    pub end_date: Option<u64>,
    pub follow_up_schedule: FollowUpSchedule,
}

impl ClientSummary {
    pub fn of(record: &ClientRecord) -> Self {
        ClientSummary {
            code: record.code,
            name: record.name.clone(),
            mobile_number: record.mobile_number.clone(),
            onboarding_state: record.onboarding_state,
            activated_at: record.activated_at,
            status: record.status,
            end_date: record.current_end_date(),
            follow_up_schedule: record.follow_up_schedule,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LatestFollowUp {
    Empty,
    Entry(FollowUpEntry),
}

/// Done/not-done indicator derived from the latest follow-up entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FollowUpStatus {
    pub is_done: bool,
    pub latest: LatestFollowUp,
}

/// One window of the client index with the records that matched a filter.
///
/// `next_start` is the index offset to pass for the following page.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientPage {
    pub clients: Vec<ClientRecord>,
    pub next_start: u32,
    pub has_next: bool,
}

/// Dashboard counts over one window of the client index. `active` includes
/// expiring clients; `expiring` is the subset that ends within the expiring
/// window. Sum the pages for contract-wide totals.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClientMetrics {
    pub total: u32,
    pub onboarding: u32,
    pub active: u32,
    pub expiring: u32,
    pub paused: u32,
    pub expired: u32,
    pub follow_ups_due: u32,
    pub renewals_this_month: u32,
}

/// Contract-wide settings, stored once in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LifecycleConfig {
    /// Look-ahead within which an active client is flagged as expiring.
    pub expiring_window_days: u32,
    /// Offset of the coach's local time from UTC. Calendar days, weekdays and
    /// month boundaries are evaluated in this offset.
    pub utc_offset_minutes: i32,
}

// Event types

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClientCreatedEvent {
    pub code: u64,
    pub onboarding_state: OnboardingState,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OnboardingChangedEvent {
    pub code: u64,
    pub from: OnboardingState,
    pub to: OnboardingState,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClientActivatedEvent {
    pub code: u64,
    pub start_date: u64,
    pub end_date: u64,
    pub follow_up_day: FollowUpDay,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionRenewedEvent {
    pub code: u64,
    pub start_date: u64,
    pub end_date: u64,
    pub period_count: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClientExpiredEvent {
    pub code: u64,
    pub previous_end_date: u64,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientPausedEvent {
    pub code: u64,
    pub duration_days: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientResumedEvent {
    pub code: u64,
    pub extended_days: u32,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FollowUpRecordedEvent {
    pub code: u64,
    pub follow_up_day: FollowUpDay,
    pub done: bool,
}
