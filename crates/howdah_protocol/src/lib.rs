//! # HOWDAH Protocol - Vehicle Wire Format
//!
//! Binary encoding of every vehicle occupancy request and notification.
//!
//! ## Architecture
//!
//! - **Serialization**: fixed-width little-endian fields plus an MSB-first
//!   bit stream sharing the same buffer
//! - **Compact identifiers**: presence mask + non-zero bytes, each call site
//!   with its own declared permutation pair
//! - **Packets**: request payloads and outbound notifications
//!
//! ## Example
//!
//! ```rust
//! use howdah_protocol::{PacketReader, PacketWriter, SWITCH_SEAT};
//! use howdah_shared::Identifier;
//!
//! let mut writer = PacketWriter::new();
//! assert!(SWITCH_SEAT.encode(&mut writer, Identifier(0x42)));
//! assert_eq!(writer.len(), 2);
//!
//! let mut reader = PacketReader::new(writer.as_slice());
//! assert_eq!(SWITCH_SEAT.decode(&mut reader), Some(Identifier(0x42)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod compact_id;
pub mod packets;
pub mod serialization;

// Re-exports for convenience
pub use compact_id::{CompactIdLayout, ALL_LAYOUTS, ENTER_VEHICLE, SET_RECORD_ID, SWITCH_SEAT};
pub use packets::{
    ChangeSeatPayload, DismissPayload, EjectPassengerPayload, EnterVehiclePayload,
    MovementUpdate, Notification, NotificationKind, RequestKind, SwitchSeatPayload,
    VehicleRecordId,
};
pub use serialization::{PacketReader, PacketWriter, MAX_BUFFER_SIZE};
