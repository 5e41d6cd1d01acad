use soroban_sdk::contracttype;

use crate::Error;

// Default 10x10 map used by the deployed game and its front end.
pub const GRID_MIN: u32 = 1;
pub const GRID_MAX: u32 = 10;

/// Inclusive bounds shared by both axes. Fixed at construction.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CoordinateDomain {
    pub min: u32,
    pub max: u32,
}

impl CoordinateDomain {
    /// Validate bounds against the backend's plaintext width.
    pub fn new(min: u32, max: u32, ciphertext_bits: u32) -> Result<Self, Error> {
        if min > max {
            return Err(Error::DomainUnsupported);
        }
        if ciphertext_bits == 0 || (ciphertext_bits < 32 && max >> ciphertext_bits != 0) {
            return Err(Error::DomainUnsupported);
        }
        Ok(Self { min, max })
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    pub fn contains(&self, v: u32) -> bool {
        self.min <= v && v <= self.max
    }
}
