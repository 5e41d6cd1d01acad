#![no_std]

//! Veil of Play: confidential position registry
//!
//! Players join a shared grid and receive an encrypted `(x, y)` position.
//! Coordinates are minted by a confidential backend (see `cipher-vault`) as
//! opaque handles; this contract never sees a plaintext coordinate. What it
//! does own is the access-control list the backend consults before it
//! decrypts anything:
//!
//! - `join` / `reroll_position` mint a fresh pair and grant it to the player
//!   only. The position is private.
//! - `make_position_public` grants the current pair to everyone. Grants are
//!   never revoked, so a published pair stays readable forever; rerolling
//!   moves the player to a new, private pair instead.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, panic_with_error, Address, BytesN,
    Env, Vec,
};


mod acl;
mod assignment;
mod domain;
mod events;
mod roster;

pub use acl::Grantee;
pub use domain::{CoordinateDomain, GRID_MAX, GRID_MIN};
pub use roster::{null_handle, PlayerRecord};

use events::{PlayerJoined, PositionAssigned, PositionMadePublic};
use roster::PLAYER_TTL_LEDGERS;

// ============================================================================
// Errors
// ============================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    PlayerNotRegistered = 1,
    DomainUnsupported = 2,
    NotInitialized = 3,
}

// ============================================================================
// Data Types
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub backend: Address,
    pub domain: CoordinateDomain,
    pub protocol_id: u32,
}

/// A published player and the handles anyone may decrypt.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicPosition {
    pub player: Address,
    pub x: BytesN<32>,
    pub y: BytesN<32>,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    PlayerCount,
    PlayerAt(u32),
    Player(Address),
    Grant(BytesN<32>, Grantee),
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct VeilOfPlay;

#[contractimpl]
impl VeilOfPlay {
    /// Bounds are checked against the backend's plaintext width here, once.
    /// A domain the backend cannot hold aborts deployment.
    pub fn __constructor(env: Env, backend: Address, grid_min: u32, grid_max: u32) {
        let caps = assignment::capabilities(&env, &backend);
        let domain = match CoordinateDomain::new(grid_min, grid_max, caps.ciphertext_bits) {
            Ok(d) => d,
            Err(e) => panic_with_error!(&env, e),
        };

        let config = Config {
            backend,
            domain,
            protocol_id: caps.protocol_id,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::PlayerCount, &0u32);
    }

    // ----- Transitions ------------------------------------------------------

    /// Join the map, or re-roll if already joined. Re-joining is not an error.
    pub fn join(env: Env, player: Address) -> Result<(BytesN<32>, BytesN<32>), Error> {
        player.require_auth();
        let config = Self::load_config(&env)?;

        if !roster::load(&env, &player).joined {
            roster::enroll(&env, &player);
            PlayerJoined {
                player: player.clone(),
            }
            .publish(&env);
            log!(&env, "player joined", player.clone());
        }

        Ok(Self::assign_position(&env, &config, &player))
    }

    /// New private position. Clears `is_public` whatever it was; handles that
    /// were published before stay publicly decryptable.
    pub fn reroll_position(env: Env, player: Address) -> Result<(BytesN<32>, BytesN<32>), Error> {
        player.require_auth();
        let config = Self::load_config(&env)?;
        Self::require_joined(&env, &player)?;

        Ok(Self::assign_position(&env, &config, &player))
    }

    /// Open the current pair to everyone. Calling it twice is harmless.
    pub fn make_position_public(
        env: Env,
        player: Address,
    ) -> Result<(BytesN<32>, BytesN<32>), Error> {
        player.require_auth();
        let mut record = Self::require_joined(&env, &player)?;
        let x = record.x.clone().ok_or(Error::PlayerNotRegistered)?;
        let y = record.y.clone().ok_or(Error::PlayerNotRegistered)?;

        acl::grant(&env, &x, Grantee::Public);
        acl::grant(&env, &y, Grantee::Public);

        record.is_public = true;
        roster::store(&env, &player, &record);
        Self::bump_instance(&env);

        PositionMadePublic {
            player: player.clone(),
        }
        .publish(&env);
        log!(&env, "position made public", player);
        Ok((x, y))
    }

    // ----- Views ------------------------------------------------------------

    /// Current handles, published or not. Decrypt rights are enforced by the
    /// backend against `is_granted`, not here. Never-joined players get the
    /// null pair.
    pub fn get_encrypted_position(env: Env, player: Address) -> (BytesN<32>, BytesN<32>) {
        roster::load(&env, &player).position(&env)
    }

    pub fn get_player_status(env: Env, player: Address) -> (bool, bool) {
        let r = roster::load(&env, &player);
        (r.joined, r.is_public)
    }

    pub fn get_player(env: Env, player: Address) -> PlayerRecord {
        roster::load(&env, &player)
    }

    /// The whole directory in join order. Reads one entry per player; large
    /// directories should be walked with `get_players`.
    pub fn get_all_players(env: Env) -> Vec<Address> {
        roster::page(&env, 0, roster::count(&env))
    }

    /// Directory slots `[start, start + limit)` in join order.
    pub fn get_players(env: Env, start: u32, limit: u32) -> Vec<Address> {
        roster::page(&env, start, limit)
    }

    pub fn get_player_count(env: Env) -> u32 {
        roster::count(&env)
    }

    /// Published players among directory slots `[start, start + limit)`, in
    /// join order. A page may come back shorter than `limit`; keep going
    /// from `start + limit` until `get_player_count` is reached.
    pub fn get_public_positions(env: Env, start: u32, limit: u32) -> Vec<PublicPosition> {
        let mut out = Vec::new(&env);
        for p in roster::page(&env, start, limit).iter() {
            let r = roster::load(&env, &p);
            if !(r.joined && r.is_public) {
                continue;
            }
            if let (Some(x), Some(y)) = (r.x, r.y) {
                out.push_back(PublicPosition { player: p, x, y });
            }
        }
        out
    }

    pub fn get_grid_bounds(env: Env) -> (u32, u32) {
        Self::read_config(&env).domain.bounds()
    }

    /// ACL lookup used by the decryption oracle.
    pub fn is_granted(env: Env, handle: BytesN<32>, grantee: Grantee) -> bool {
        acl::is_granted(&env, &handle, &grantee)
    }

    pub fn get_backend(env: Env) -> Address {
        Self::read_config(&env).backend
    }

    pub fn confidential_protocol_id(env: Env) -> u32 {
        Self::read_config(&env).protocol_id
    }

    // ----- Internal ---------------------------------------------------------

    /// Mint, grant to the player, overwrite the record. Shared by join and
    /// reroll so both leave the player in `Joined(private)`.
    fn assign_position(env: &Env, config: &Config, player: &Address) -> (BytesN<32>, BytesN<32>) {
        let (x, y) = assignment::generate(env, &config.backend, &config.domain);

        let me = Grantee::Account(player.clone());
        acl::grant(env, &x, me.clone());
        acl::grant(env, &y, me);

        let record = PlayerRecord {
            joined: true,
            is_public: false,
            x: Some(x.clone()),
            y: Some(y.clone()),
        };
        roster::store(env, player, &record);
        Self::bump_instance(env);

        PositionAssigned {
            player: player.clone(),
            x: x.clone(),
            y: y.clone(),
            is_public: record.is_public,
        }
        .publish(env);
        log!(env, "position assigned", player.clone());
        (x, y)
    }

    fn require_joined(env: &Env, player: &Address) -> Result<PlayerRecord, Error> {
        let record = roster::load(env, player);
        if record.joined {
            Ok(record)
        } else {
            Err(Error::PlayerNotRegistered)
        }
    }

    fn load_config(env: &Env) -> Result<Config, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn read_config(env: &Env) -> Config {
        match Self::load_config(env) {
            Ok(c) => c,
            Err(e) => panic_with_error!(env, e),
        }
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(PLAYER_TTL_LEDGERS, PLAYER_TTL_LEDGERS);
    }
}
