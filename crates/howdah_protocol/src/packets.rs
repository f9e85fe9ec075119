//! # Packet Definitions
//!
//! Every request and notification of the vehicle protocol.
//!
//! ## Request Payloads
//!
//! ```text
//! Dismiss            f32 y, f32 z, f32 x
//! ChangeSeat         f32 z, i8 seat, f32 y, f32 x, u64 accessory
//! PrevSeat/NextSeat  (empty)
//! SwitchSeat         i8 seat, compact id (SWITCH_SEAT)
//! EnterVehicle       compact id (ENTER_VEHICLE)
//! EjectPassenger     u64 target
//! RequestExit        (empty)
//! SetRecordId        (empty)
//! ```

use bytemuck::{Pod, Zeroable};
use howdah_shared::{Identifier, Position, SeatIndex};

use crate::compact_id::{ENTER_VEHICLE, SET_RECORD_ID, SWITCH_SEAT};
use crate::serialization::{PacketReader, PacketWriter};

/// Client -> Server request kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RequestKind {
    /// Leave the vehicle currently under control, landing at a position.
    DismissControlledVehicle = 0,
    /// Generic seat change, possibly onto an accessory vehicle.
    ChangeSeatsOnControlledVehicle = 1,
    /// Move to the previous seat.
    RequestVehiclePrevSeat = 2,
    /// Move to the next seat.
    RequestVehicleNextSeat = 3,
    /// Move to an explicit seat of a named vehicle.
    RequestVehicleSwitchSeat = 4,
    /// Leave the current seat.
    RequestVehicleExit = 5,
    /// Board another player's vehicle.
    EnterPlayerVehicle = 6,
    /// Remove a passenger from the requester's vehicle.
    EjectPassenger = 7,
    /// Ask for the requester's vehicle record id to be broadcast.
    SetVehicleRecId = 8,
}

impl RequestKind {
    /// Every request kind, in tag order.
    pub const ALL: [Self; 9] = [
        Self::DismissControlledVehicle,
        Self::ChangeSeatsOnControlledVehicle,
        Self::RequestVehiclePrevSeat,
        Self::RequestVehicleNextSeat,
        Self::RequestVehicleSwitchSeat,
        Self::RequestVehicleExit,
        Self::EnterPlayerVehicle,
        Self::EjectPassenger,
        Self::SetVehicleRecId,
    ];

    /// Converts a frame tag into a request kind.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if (value as usize) < Self::ALL.len() {
            Some(Self::ALL[value as usize])
        } else {
            None
        }
    }
}

/// Dismiss payload: where the occupant lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissPayload {
    /// Landing position.
    pub position: Position,
}

impl DismissPayload {
    /// Reads the payload (`Y, Z, X` on the wire).
    pub fn read(reader: &mut PacketReader<'_>) -> Option<Self> {
        reader.read_position_yzx().map(|position| Self { position })
    }

    /// Writes the payload.
    pub fn write(&self, writer: &mut PacketWriter) -> bool {
        writer.write_f32(self.position.y)
            && writer.write_f32(self.position.z)
            && writer.write_f32(self.position.x)
    }
}

/// Generic seat-change payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangeSeatPayload {
    /// Requested seat; its sign picks the direction when no accessory is named.
    pub seat: SeatIndex,
    /// Client-side position at the time of the request.
    pub position: Position,
    /// Accessory vehicle, or [`Identifier::EMPTY`].
    pub accessory: Identifier,
}

impl ChangeSeatPayload {
    /// Reads the payload (`z, seat, y, x, accessory` on the wire).
    pub fn read(reader: &mut PacketReader<'_>) -> Option<Self> {
        let z = reader.read_f32()?;
        let seat = reader.read_i8()?;
        let y = reader.read_f32()?;
        let x = reader.read_f32()?;
        let accessory = reader.read_identifier()?;
        Some(Self {
            seat,
            position: Position::new(x, y, z),
            accessory,
        })
    }

    /// Writes the payload.
    pub fn write(&self, writer: &mut PacketWriter) -> bool {
        writer.write_f32(self.position.z)
            && writer.write_i8(self.seat)
            && writer.write_f32(self.position.y)
            && writer.write_f32(self.position.x)
            && writer.write_identifier(self.accessory)
    }
}

/// Explicit seat switch payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchSeatPayload {
    /// Destination seat.
    pub seat: SeatIndex,
    /// Destination vehicle.
    pub vehicle: Identifier,
}

impl SwitchSeatPayload {
    /// Reads the payload.
    pub fn read(reader: &mut PacketReader<'_>) -> Option<Self> {
        let seat = reader.read_i8()?;
        let vehicle = SWITCH_SEAT.decode(reader)?;
        Some(Self { seat, vehicle })
    }

    /// Writes the payload.
    pub fn write(&self, writer: &mut PacketWriter) -> bool {
        writer.write_i8(self.seat) && SWITCH_SEAT.encode(writer, self.vehicle)
    }
}

/// Board-vehicle payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnterVehiclePayload {
    /// Player whose vehicle should be boarded.
    pub target: Identifier,
}

impl EnterVehiclePayload {
    /// Reads the payload.
    pub fn read(reader: &mut PacketReader<'_>) -> Option<Self> {
        ENTER_VEHICLE.decode(reader).map(|target| Self { target })
    }

    /// Writes the payload.
    pub fn write(&self, writer: &mut PacketWriter) -> bool {
        ENTER_VEHICLE.encode(writer, self.target)
    }
}

/// Eject payload. The target travels as a raw 64-bit value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EjectPassengerPayload {
    /// Passenger to remove.
    pub target: Identifier,
}

impl EjectPassengerPayload {
    /// Reads the payload.
    pub fn read(reader: &mut PacketReader<'_>) -> Option<Self> {
        reader.read_identifier().map(|target| Self { target })
    }

    /// Writes the payload.
    pub fn write(&self, writer: &mut PacketWriter) -> bool {
        writer.write_identifier(self.target)
    }
}

/// Server -> Client notification kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationKind {
    /// Minimal movement update.
    MoveUpdate = 0,
    /// Vehicle record id of an entity.
    SetVehicleRecId = 1,
}

/// Minimal movement update broadcast when an occupant dismisses its vehicle.
///
/// Size: 32 bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MovementUpdate {
    /// Entity that moved.
    pub mover: u64,
    /// Server time of the move (ms).
    pub move_time: u32,
    /// Primary movement flags.
    pub flags: u32,
    /// Position X.
    pub pos_x: f32,
    /// Position Y.
    pub pos_y: f32,
    /// Position Z.
    pub pos_z: f32,
    /// Secondary movement flags.
    pub flags2: u16,
    /// Padding for alignment.
    pub _padding: u16,
}

impl MovementUpdate {
    /// Size in bytes.
    pub const SIZE: usize = 32;

    /// Secondary flag: pitch is interpolated client-side.
    pub const FLAG2_INTERPOLATED_PITCHING: u16 = 0x1000;

    /// Builds the update sent when an occupant lands at `position`.
    #[must_use]
    pub const fn dismount(mover: Identifier, position: Position, move_time: u32) -> Self {
        Self {
            mover: mover.raw(),
            move_time,
            flags: 0,
            pos_x: position.x,
            pos_y: position.y,
            pos_z: position.z,
            flags2: Self::FLAG2_INTERPOLATED_PITCHING,
            _padding: 0,
        }
    }

    /// Mover identifier.
    #[inline]
    #[must_use]
    pub const fn mover(&self) -> Identifier {
        Identifier(self.mover)
    }

    /// Carried position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.pos_x, self.pos_y, self.pos_z)
    }

    /// Returns true if pitch interpolation is flagged.
    #[inline]
    #[must_use]
    pub const fn has_interpolated_pitching(&self) -> bool {
        self.flags2 & Self::FLAG2_INTERPOLATED_PITCHING != 0
    }
}

/// Vehicle record id of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleRecordId {
    /// Record id (0 when none applies).
    pub record_id: u32,
    /// Entity the record id belongs to.
    pub subject: Identifier,
}

/// Outbound notification container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Notification {
    /// Movement update.
    Move(MovementUpdate),
    /// Vehicle record id.
    RecordId(VehicleRecordId),
}

impl Notification {
    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::Move(_) => NotificationKind::MoveUpdate,
            Self::RecordId(_) => NotificationKind::SetVehicleRecId,
        }
    }

    /// Serializes the notification (kind tag followed by payload).
    pub fn serialize(&self, writer: &mut PacketWriter) -> bool {
        writer.reset();
        if !writer.write_u8(self.kind() as u8) {
            return false;
        }
        match self {
            Self::Move(update) => writer.write_pod(update),
            Self::RecordId(record) => {
                writer.write_u32(record.record_id) && SET_RECORD_ID.encode(writer, record.subject)
            }
        }
    }

    /// Deserializes a notification written by [`Self::serialize`].
    pub fn deserialize(reader: &mut PacketReader<'_>) -> Option<Self> {
        match reader.read_u8()? {
            x if x == NotificationKind::MoveUpdate as u8 => {
                reader.read_pod::<MovementUpdate>().map(Self::Move)
            }
            x if x == NotificationKind::SetVehicleRecId as u8 => {
                let record_id = reader.read_u32()?;
                let subject = SET_RECORD_ID.decode(reader)?;
                Some(Self::RecordId(VehicleRecordId { record_id, subject }))
            }
            _ => None,
        }
    }

    /// Serializes into an owned byte vector.
    #[must_use]
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        let mut writer = PacketWriter::new();
        self.serialize(&mut writer)
            .then(|| writer.as_slice().to_vec())
    }
}
