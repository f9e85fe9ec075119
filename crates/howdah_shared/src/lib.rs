//! # HOWDAH Shared
//!
//! Common types used by the protocol codec and the occupancy core.
//!
//! ## CRITICAL RULE
//!
//! This crate owns no entity state. Identifiers are opaque handles resolved
//! through the World Entity Directory; nothing here constructs or destroys
//! entities.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod identifier;
pub mod math;

pub use constants::{SeatIndex, INTERACTION_DISTANCE, MAX_VEHICLE_SEATS};
pub use identifier::{Identifier, IdentifierKind};
pub use math::Position;
