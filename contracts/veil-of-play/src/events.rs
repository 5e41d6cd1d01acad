use soroban_sdk::{contractevent, Address, BytesN};

/// First join of an identity. Never re-emitted for the same player.
#[contractevent]
pub struct PlayerJoined {
    #[topic]
    pub player: Address,
}

/// Fresh handles on every join and reroll.
#[contractevent]
pub struct PositionAssigned {
    #[topic]
    pub player: Address,
    pub x: BytesN<32>,
    pub y: BytesN<32>,
    pub is_public: bool,
}

#[contractevent]
pub struct PositionMadePublic {
    #[topic]
    pub player: Address,
}
