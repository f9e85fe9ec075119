//! # Entity Identifiers
//!
//! 64-bit opaque identifiers with an embedded type discriminant.
//!
//! ## Layout
//!
//! ```text
//! ┌────────────────┬────────────────┬────────────────────────────────┐
//! │ High (16 bits) │ Entry (16)     │ Counter (32 bits)              │
//! └────────────────┴────────────────┴────────────────────────────────┘
//!  bits 63..48       bits 47..32      bits 31..0
//! ```
//!
//! The high part tells players apart from world-controlled units without
//! asking the directory.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// What kind of entity an identifier names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// The all-zero identifier. Names nothing.
    Empty,
    /// Player-controlled character.
    Player,
    /// World-controlled creature.
    Creature,
    /// World-controlled vehicle unit.
    Vehicle,
    /// Pet owned by another entity.
    Pet,
    /// Anything else (items, game objects, transports).
    Other,
}

impl IdentifierKind {
    /// Returns true for non-player units that can sit in a seat.
    #[inline]
    #[must_use]
    pub const fn is_unit(self) -> bool {
        matches!(self, Self::Creature | Self::Vehicle)
    }
}

/// Opaque 64-bit entity identifier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Serialize,
    Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Identifier(pub u64);

impl Identifier {
    /// The empty identifier.
    pub const EMPTY: Self = Self(0);

    /// High part for player characters.
    pub const HIGH_PLAYER: u16 = 0x0000;
    /// High part for creatures.
    pub const HIGH_CREATURE: u16 = 0xF130;
    /// High part for pets.
    pub const HIGH_PET: u16 = 0xF140;
    /// High part for vehicle units.
    pub const HIGH_VEHICLE: u16 = 0xF150;

    /// Builds an identifier from its three parts.
    #[inline]
    #[must_use]
    pub const fn from_parts(high: u16, entry: u16, counter: u32) -> Self {
        Self(((high as u64) << 48) | ((entry as u64) << 32) | counter as u64)
    }

    /// Builds a player identifier from its counter.
    #[inline]
    #[must_use]
    pub const fn player(counter: u32) -> Self {
        Self::from_parts(Self::HIGH_PLAYER, 0, counter)
    }

    /// Builds a creature identifier.
    #[inline]
    #[must_use]
    pub const fn creature(entry: u16, counter: u32) -> Self {
        Self::from_parts(Self::HIGH_CREATURE, entry, counter)
    }

    /// Builds a vehicle unit identifier.
    #[inline]
    #[must_use]
    pub const fn vehicle(entry: u16, counter: u32) -> Self {
        Self::from_parts(Self::HIGH_VEHICLE, entry, counter)
    }

    /// Raw 64-bit value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true for the all-zero identifier.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// High 16 bits (type discriminant).
    #[inline]
    #[must_use]
    pub const fn high(self) -> u16 {
        (self.0 >> 48) as u16
    }

    /// Low 32 bits (per-kind counter). Used in diagnostics.
    #[inline]
    #[must_use]
    pub const fn counter(self) -> u32 {
        self.0 as u32
    }

    /// Extracts the embedded kind without any lookup.
    #[must_use]
    pub const fn kind(self) -> IdentifierKind {
        if self.is_empty() {
            return IdentifierKind::Empty;
        }
        match self.high() {
            Self::HIGH_PLAYER => IdentifierKind::Player,
            Self::HIGH_CREATURE => IdentifierKind::Creature,
            Self::HIGH_VEHICLE => IdentifierKind::Vehicle,
            Self::HIGH_PET => IdentifierKind::Pet,
            _ => IdentifierKind::Other,
        }
    }

    /// Returns true if this names a player character.
    #[inline]
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self.kind(), IdentifierKind::Player)
    }

    /// Logical bytes 0..7, byte `k` being bits `8k..8k+7`.
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Reassembles an identifier from its logical bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}
