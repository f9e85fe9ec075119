//! # HOWDAH Vehicle - Occupancy Core
//!
//! Server-side handling of the vehicle occupancy protocol: who sits where,
//! who may move, who may leave and who may throw whom out.
//!
//! ## Design Principles
//!
//! 1. **Seat table is the truth** - both halves of a binding change together
//! 2. **Permissions before payloads** - a request's preconditions are checked
//!    against the requester's current seat first
//! 3. **Silent rejections** - the requester is never told; the log is
//! 4. **Glass walls** - entity storage, movement and fan-out live behind
//!    traits the host implements
//!
//! ## Example
//!
//! ```rust
//! use howdah_shared::{Identifier, Position};
//! use howdah_vehicle::{
//!     MockBroadcaster, MockEffectLedger, MockEntityDirectory, MockMovementService, Outcome,
//!     SeatEntry, SeatFlags, VehicleConfig, VehicleProtocolHandler,
//! };
//!
//! let car = Identifier::vehicle(42, 1);
//! let driver = Identifier::player(7);
//!
//! let mut directory = MockEntityDirectory::new();
//! directory.spawn_vehicle(car, Position::ORIGIN, vec![SeatEntry::new(0, SeatFlags::DRIVER)]);
//! directory.spawn(driver, Position::ORIGIN);
//!
//! let mut handler = VehicleProtocolHandler::new(
//!     directory,
//!     MockMovementService::new(),
//!     MockBroadcaster::new(),
//!     MockEffectLedger::new(),
//!     VehicleConfig::default(),
//! );
//!
//! // Not seated yet: the exit request is rejected and its payload dropped.
//! assert!(handler.handle_frame(driver, &[5]).is_err());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod handler;
pub mod occupancy;
pub mod seat;
pub mod traits;

pub use config::VehicleConfig;
pub use error::{ConfigError, OccupancyError, OccupancyResult};
pub use handler::{Outcome, VehicleProtocolHandler};
pub use occupancy::{OccupancyController, SwitchOutcome, SwitchTarget};
pub use seat::{SeatBinding, SeatEntry, SeatFlags};
pub use traits::{
    Dismount, EffectLedger, EntityDirectory, MockBroadcaster, MockEffectLedger,
    MockEntityDirectory, MockMovementService, MovementService, PresenceBroadcaster, Recipients,
    SentPacket,
};
