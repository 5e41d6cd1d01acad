use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::DataKey;

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;
const TTL_SECONDS: u32 = 30 * 24 * 60 * 60;

/// TTL for player records and grants: 518,400 ledgers (~30 days).
pub(crate) const PLAYER_TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

/// Per-identity registry state. An absent record reads as the unjoined
/// default.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerRecord {
    pub joined: bool,
    pub is_public: bool,
    pub x: Option<BytesN<32>>,
    pub y: Option<BytesN<32>>,
}

impl PlayerRecord {
    pub fn unjoined() -> Self {
        Self {
            joined: false,
            is_public: false,
            x: None,
            y: None,
        }
    }

    /// Current handle pair, or the null pair for a record with no handles.
    pub fn position(&self, env: &Env) -> (BytesN<32>, BytesN<32>) {
        let null = null_handle(env);
        (
            self.x.clone().unwrap_or_else(|| null.clone()),
            self.y.clone().unwrap_or(null),
        )
    }
}

/// The all-zero handle. Never minted, never granted.
pub fn null_handle(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

pub(crate) fn load(env: &Env, player: &Address) -> PlayerRecord {
    env.storage()
        .persistent()
        .get(&DataKey::Player(player.clone()))
        .unwrap_or_else(PlayerRecord::unjoined)
}

pub(crate) fn store(env: &Env, player: &Address, record: &PlayerRecord) {
    let key = DataKey::Player(player.clone());
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, PLAYER_TTL_LEDGERS, PLAYER_TTL_LEDGERS);
}

// ----- Directory ------------------------------------------------------------
//
// One persistent entry per slot plus a counter in instance storage. The
// instance entry is loaded on every call and must stay a fixed size however
// many players join.

pub(crate) fn count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PlayerCount)
        .unwrap_or(0)
}

/// Players in slots `[start, start + limit)`, clamped to the directory.
pub(crate) fn page(env: &Env, start: u32, limit: u32) -> Vec<Address> {
    let end = start.saturating_add(limit).min(count(env));
    let store = env.storage().persistent();
    let mut out = Vec::new(env);
    for index in start..end {
        if let Some(player) = store.get(&DataKey::PlayerAt(index)) {
            out.push_back(player);
        }
    }
    out
}

/// Callers only append identities whose record was not yet joined, which
/// keeps the directory free of duplicates without a scan.
pub(crate) fn enroll(env: &Env, player: &Address) {
    let index = count(env);
    let key = DataKey::PlayerAt(index);
    env.storage().persistent().set(&key, player);
    env.storage()
        .persistent()
        .extend_ttl(&key, PLAYER_TTL_LEDGERS, PLAYER_TTL_LEDGERS);
    env.storage()
        .instance()
        .set(&DataKey::PlayerCount, &(index + 1));
}
