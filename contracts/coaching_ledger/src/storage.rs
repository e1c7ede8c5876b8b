//! Client record storage: persistent records keyed by code, plus the code
//! counter and insertion-ordered code index in instance storage.

use crate::types::{ClientRecord, DataKey, Error};
use soroban_sdk::{Env, Vec};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Hands out the next client code. Codes start at 1 and are never reused.
pub fn next_code(env: &Env) -> Result<u64, Error> {
    let code: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextCode)
        .ok_or(Error::NotFound)?;
    let next = code.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::NextCode, &next);
    Ok(code)
}

pub fn client_codes(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&DataKey::ClientCodes)
        .unwrap_or(Vec::new(env))
}

fn index_code(env: &Env, code: u64) {
    let mut codes = client_codes(env);
    codes.push_back(code);
    env.storage().instance().set(&DataKey::ClientCodes, &codes);
}

pub fn load_client(env: &Env, code: u64) -> Result<ClientRecord, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Client(code))
        .ok_or(Error::NotFound)
}

/// Writes a record back and extends its TTL.
pub fn save_client(env: &Env, record: &ClientRecord) {
    let key = DataKey::Client(record.code);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Stores a freshly created record and adds its code to the index.
pub fn insert_client(env: &Env, record: &ClientRecord) {
    save_client(env, record);
    index_code(env, record.code);
}

/// Largest window of the client index any single query reads.
pub const MAX_PAGE_SIZE: u32 = 50;

/// A bounded window `[start, end)` of the client index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexWindow {
    pub start: u32,
    pub end: u32,
    pub has_next: bool,
}

/// Clamps `start`/`limit` to the index length and [`MAX_PAGE_SIZE`].
pub fn index_window(env: &Env, start: u32, limit: u32) -> IndexWindow {
    let len = client_codes(env).len();
    let start = start.min(len);
    let end = start.saturating_add(limit.min(MAX_PAGE_SIZE)).min(len);
    IndexWindow {
        start,
        end,
        has_next: end < len,
    }
}

/// Records for one window of the index, in creation order.
pub fn load_clients_window(env: &Env, window: &IndexWindow) -> Vec<ClientRecord> {
    let codes = client_codes(env);
    let mut records = Vec::new(env);
    for i in window.start..window.end {
        let Some(code) = codes.get(i) else {
            continue;
        };
        if let Some(record) = env
            .storage()
            .persistent()
            .get::<DataKey, ClientRecord>(&DataKey::Client(code))
        {
            records.push_back(record);
        }
    }
    records
}
