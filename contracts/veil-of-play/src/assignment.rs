use soroban_sdk::{contractclient, Address, BytesN, Env};

use crate::domain::CoordinateDomain;

// ============================================================================
// Confidential Backend Interface
// ============================================================================

#[contractclient(name = "CipherVaultClient")]
pub trait CipherVault {
    fn ciphertext_bits(env: Env) -> u32;

    fn protocol_id(env: Env) -> u32;

    fn rand_in_range(env: Env, minter: Address, min: u32, max: u32) -> BytesN<32>;
}

/// What the backend reports about itself at deployment time.
pub(crate) struct BackendCaps {
    pub ciphertext_bits: u32,
    pub protocol_id: u32,
}

pub(crate) fn capabilities(env: &Env, backend: &Address) -> BackendCaps {
    let vault = CipherVaultClient::new(env, backend);
    BackendCaps {
        ciphertext_bits: vault.ciphertext_bits(),
        protocol_id: vault.protocol_id(),
    }
}

/// Mint an independent `(x, y)` pair, each uniform over the domain. The
/// registry is recorded as minter so the backend consults its ACL on decrypt.
/// Grants are the caller's job.
pub(crate) fn generate(
    env: &Env,
    backend: &Address,
    domain: &CoordinateDomain,
) -> (BytesN<32>, BytesN<32>) {
    let vault = CipherVaultClient::new(env, backend);
    let minter = env.current_contract_address();
    let x = vault.rand_in_range(&minter, &domain.min, &domain.max);
    let y = vault.rand_in_range(&minter, &domain.min, &domain.max);
    (x, y)
}
