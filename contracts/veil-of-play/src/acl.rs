//! Append-only decryption grants.
//!
//! A grant is keyed by `(handle, grantee)` and is never removed. Replacing a
//! player's handles leaves the old grants in place; the old handles simply
//! stop being the player's current position.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::roster::PLAYER_TTL_LEDGERS;
use crate::DataKey;

/// Who may ask the decryption oracle to open a handle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Grantee {
    Public,
    Account(Address),
}

/// Idempotent. Granting again only renews the entry's TTL.
pub(crate) fn grant(env: &Env, handle: &BytesN<32>, grantee: Grantee) {
    let key = DataKey::Grant(handle.clone(), grantee);
    let store = env.storage().persistent();
    if !store.has(&key) {
        store.set(&key, &true);
    }
    store.extend_ttl(&key, PLAYER_TTL_LEDGERS, PLAYER_TTL_LEDGERS);
}

/// A public grant satisfies every account. An account grant never satisfies
/// a `Public` query.
pub(crate) fn is_granted(env: &Env, handle: &BytesN<32>, grantee: &Grantee) -> bool {
    let store = env.storage().persistent();
    if store.has(&DataKey::Grant(handle.clone(), Grantee::Public)) {
        return true;
    }
    match grantee {
        Grantee::Public => false,
        Grantee::Account(_) => store.has(&DataKey::Grant(handle.clone(), grantee.clone())),
    }
}
