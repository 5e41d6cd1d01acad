#![no_std]

//! Cipher Vault: confidential value backend for Soroban game contracts
//!
//! This contract stands in for an FHE coprocessor. Game contracts ask it for
//! bounded random values and receive opaque 32-byte handles; they never see
//! the value behind a handle. Reading a value back goes through the vault's
//! decrypt entry points, which only answer when the contract that minted the
//! handle reports a grant for the requester in its own access-control list.
//!
//! ## Architecture
//!
//! - `rand_in_range` draws a uniform value in `[min, max]` from the host PRNG,
//!   binds it to a fresh handle and records the calling contract as minter.
//! - `user_decrypt` / `public_decrypt` call `is_granted(handle, grantee)` on
//!   the minter and return the value only if the grant exists.
//! - Values are stored in clear in vault storage, the same way a mock
//!   coprocessor does. The vault never exposes them outside the decrypt path.
//!
//! ## Ciphertext width
//!
//! Values are `euint8`-sized: anything above `2^CIPHERTEXT_BITS - 1` is
//! rejected with `RangeUnsupported`. Callers read `ciphertext_bits()` once at
//! deployment to validate their own bounds.

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, log, Address, Bytes,
    BytesN, Env,
};


// ============================================================================
// Errors
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    HandleNotFound = 1,
    RangeUnsupported = 2,
    AccessDenied = 3,
}

// ============================================================================
// Minter ACL Interface
// ============================================================================

/// Who a grant is issued to. Must match the minter's own `Grantee` encoding.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Grantee {
    Public,
    Account(Address),
}

#[contractclient(name = "AclClient")]
pub trait AccessControl {
    fn is_granted(env: Env, handle: BytesN<32>, grantee: Grantee) -> bool;
}

// ============================================================================
// Data Types
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ciphertext {
    pub minter: Address,
    pub value: u32,
}

// ============================================================================
// Storage
// ============================================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    ProtocolId,
    /// Monotonic counter mixed into every handle preimage.
    Nonce,
    Ciphertext(BytesN<32>),
}

pub const CIPHERTEXT_BITS: u32 = 8;

const CIPHERTEXT_TTL_LEDGERS: u32 = 518_400; // ~30 days

// ============================================================================
// Contract
// ============================================================================

#[contract]
pub struct CipherVault;

#[contractimpl]
impl CipherVault {
    /// Deploy with the protocol identifier reported to game contracts.
    pub fn __constructor(env: Env, protocol_id: u32) {
        env.storage().instance().set(&DataKey::ProtocolId, &protocol_id);
        env.storage().instance().set(&DataKey::Nonce, &0u64);
    }

    // ----- Capabilities -----------------------------------------------------

    pub fn ciphertext_bits(_env: Env) -> u32 {
        CIPHERTEXT_BITS
    }

    pub fn protocol_id(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::ProtocolId)
            .unwrap_or(0)
    }

    // ----- Minting ----------------------------------------------------------

    /// Bind a uniform random value in `[min, max]` to a new handle owned by
    /// `minter`. The ACL is left untouched: nobody can decrypt the handle
    /// until the minter grants it.
    pub fn rand_in_range(
        env: Env,
        minter: Address,
        min: u32,
        max: u32,
    ) -> Result<BytesN<32>, VaultError> {
        minter.require_auth();
        if min > max || max > Self::max_plaintext() {
            return Err(VaultError::RangeUnsupported);
        }

        let value = env.prng().gen_range::<u64>((min as u64)..=(max as u64)) as u32;
        let handle = Self::next_handle(&env);

        let key = DataKey::Ciphertext(handle.clone());
        env.storage().persistent().set(&key, &Ciphertext { minter, value });
        env.storage()
            .persistent()
            .extend_ttl(&key, CIPHERTEXT_TTL_LEDGERS, CIPHERTEXT_TTL_LEDGERS);
        env.storage()
            .instance()
            .extend_ttl(CIPHERTEXT_TTL_LEDGERS, CIPHERTEXT_TTL_LEDGERS);
        Ok(handle)
    }

    pub fn minter_of(env: Env, handle: BytesN<32>) -> Result<Address, VaultError> {
        Ok(Self::load_ciphertext(&env, &handle)?.minter)
    }

    // ----- Decryption -------------------------------------------------------

    /// Decrypt for a specific account. A public grant on the handle also
    /// satisfies this check, since the minter's ACL folds it in.
    pub fn user_decrypt(
        env: Env,
        requester: Address,
        handle: BytesN<32>,
    ) -> Result<u32, VaultError> {
        requester.require_auth();
        let ct = Self::load_ciphertext(&env, &handle)?;
        Self::require_grant(&env, &ct, &handle, Grantee::Account(requester))?;
        Ok(ct.value)
    }

    /// Decrypt a handle its minter has opened to everyone.
    pub fn public_decrypt(env: Env, handle: BytesN<32>) -> Result<u32, VaultError> {
        let ct = Self::load_ciphertext(&env, &handle)?;
        Self::require_grant(&env, &ct, &handle, Grantee::Public)?;
        Ok(ct.value)
    }

    // ----- Internal ---------------------------------------------------------

    fn max_plaintext() -> u32 {
        (1u32 << CIPHERTEXT_BITS) - 1
    }

    fn load_ciphertext(env: &Env, handle: &BytesN<32>) -> Result<Ciphertext, VaultError> {
        env.storage()
            .persistent()
            .get(&DataKey::Ciphertext(handle.clone()))
            .ok_or(VaultError::HandleNotFound)
    }

    fn require_grant(
        env: &Env,
        ct: &Ciphertext,
        handle: &BytesN<32>,
        grantee: Grantee,
    ) -> Result<(), VaultError> {
        let acl = AclClient::new(env, &ct.minter);
        if acl.is_granted(handle, &grantee) {
            Ok(())
        } else {
            log!(env, "decrypt denied", handle.clone());
            Err(VaultError::AccessDenied)
        }
    }

    /// keccak256(nonce || ledger sequence || prng word). The preimage never
    /// includes the value, so a handle says nothing about what it hides.
    fn next_handle(env: &Env) -> BytesN<32> {
        let nonce: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Nonce)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::Nonce, &nonce.wrapping_add(1));

        let mut preimage = Bytes::from_array(env, &nonce.to_be_bytes());
        preimage.append(&Bytes::from_array(env, &env.ledger().sequence().to_be_bytes()));
        preimage.append(&Bytes::from_array(env, &env.prng().gen::<u64>().to_be_bytes()));
        env.crypto().keccak256(&preimage).to_bytes()
    }
}
