//! # Protocol Constants
//!
//! Values shared by every peer speaking the vehicle protocol.
//!
//! **CRITICAL:** These values are baked into the client binary.
//! Changes require a client rebuild.

/// Maximum number of seats a single vehicle can expose.
pub const MAX_VEHICLE_SEATS: usize = 8;

/// Default range (world units) within which a player may board another
/// player's vehicle.
pub const INTERACTION_DISTANCE: f32 = 5.0;

/// Seat slot index as carried on the wire.
pub type SeatIndex = i8;
