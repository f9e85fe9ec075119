//! # Collaborator Traits
//!
//! Interfaces of the systems the occupancy core talks to but does not own.
//!
//! ## Architecture (Glass Walls Policy)
//!
//! The occupancy core DOES NOT store entities, integrate movement or fan out
//! packets. Each of those systems implements a trait defined here.
//!
//! ```text
//! howdah_vehicle defines:     Host server implements:
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │ trait EntityDirectory│ ←─ │ impl EntityDirectory │
//! └─────────────────────┘     └─────────────────────┘
//! ```
//!
//! The directory serializes mutations of a vehicle's seat table; the core is
//! only ever invoked from that single-writer context.

use std::collections::HashMap;

use howdah_protocol::MovementUpdate;
use howdah_shared::{Identifier, Position, SeatIndex, MAX_VEHICLE_SEATS};

use crate::seat::{find_seat, SeatBinding, SeatEntry};

// ============================================================================
// WORLD ENTITY DIRECTORY
// ============================================================================

/// Interface to the world's entity storage.
///
/// Owns entities, seat catalogs and both halves of every seat binding. Only
/// [`crate::occupancy::OccupancyController`] writes bindings.
pub trait EntityDirectory {
    /// Returns true if the entity currently exists in the world.
    fn exists(&self, id: Identifier) -> bool;

    /// Seat catalog of a vehicle-capable entity, in catalog order.
    ///
    /// `None` if the entity does not exist or has no vehicle capability.
    fn seats(&self, vehicle: Identifier) -> Option<&[SeatEntry]>;

    /// Current occupant of a seat.
    fn seat_occupant(&self, vehicle: Identifier, seat: SeatIndex) -> Option<Identifier>;

    /// Sets or clears the occupant side of a binding.
    fn set_seat_occupant(
        &mut self,
        vehicle: Identifier,
        seat: SeatIndex,
        occupant: Option<Identifier>,
    );

    /// Seat the occupant is bound to.
    fn binding(&self, occupant: Identifier) -> Option<SeatBinding>;

    /// Sets or clears the occupant's side of a binding.
    fn set_binding(&mut self, occupant: Identifier, binding: Option<SeatBinding>);

    /// Entity the given one is currently controlling (charm/control link).
    fn controlled(&self, id: Identifier) -> Option<Identifier>;

    /// Last known position of an entity.
    fn position(&self, id: Identifier) -> Option<Position>;

    /// Replaces an entity's own movement state.
    fn apply_movement(&mut self, id: Identifier, update: &MovementUpdate);

    /// Asks an accessory vehicle whether it takes `passenger` into `seat`.
    ///
    /// The accessory is autonomous and may decline for its own reasons.
    fn accepts_passenger(
        &self,
        accessory: Identifier,
        passenger: Identifier,
        seat: SeatIndex,
    ) -> bool;
}

// ============================================================================
// MOVEMENT & PROXIMITY SERVICE
// ============================================================================

/// Interface to spatial queries and social grouping.
pub trait MovementService {
    /// Both entities are on the same map and within `range` of each other.
    fn within_distance(&self, a: Identifier, b: Identifier, range: f32) -> bool;

    /// Both entities belong to the same group.
    fn in_group_with(&self, a: Identifier, b: Identifier) -> bool;

    /// Server time in milliseconds, stamped onto movement updates.
    fn now_ms(&self) -> u32;
}

// ============================================================================
// PRESENCE BROADCASTER
// ============================================================================

/// Who receives a broadcast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recipients {
    /// Nearby observers, not the origin.
    OthersOnly,
    /// Nearby observers and the origin.
    IncludeSelf,
}

/// Interface to fan-out towards nearby observers.
pub trait PresenceBroadcaster {
    /// Sends an encoded notification to observers of `origin`.
    fn send_to_set(&mut self, origin: Identifier, packet: &[u8], recipients: Recipients);

    /// An occupant left `from` and now stands at `position`.
    fn occupant_dismounted(&mut self, occupant: Identifier, from: SeatBinding, position: Position);
}

// ============================================================================
// EFFECT LEDGER
// ============================================================================

/// Interface to persistent effect bookkeeping.
pub trait EffectLedger {
    /// Values of the entity's active "set vehicle id" effects, oldest first.
    fn vehicle_record_ids(&self, id: Identifier) -> Vec<u32>;
}

// ============================================================================
// MOCK IMPLEMENTATIONS (For Testing)
// ============================================================================

#[derive(Clone, Debug, Default)]
struct MockEntity {
    position: Position,
    seats: Option<Vec<SeatEntry>>,
    occupants: HashMap<SeatIndex, Identifier>,
    binding: Option<SeatBinding>,
    controlled: Option<Identifier>,
    last_movement: Option<MovementUpdate>,
    declines_passengers: bool,
}

/// In-memory entity directory.
///
/// Grants the control link when an occupant takes a `CAN_CONTROL` seat and
/// drops it when the occupant leaves, like a real directory reacting to
/// binding changes.
#[derive(Debug, Default)]
pub struct MockEntityDirectory {
    entities: HashMap<Identifier, MockEntity>,
}

impl MockEntityDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain entity.
    pub fn spawn(&mut self, id: Identifier, position: Position) {
        self.entities.insert(
            id,
            MockEntity {
                position,
                ..MockEntity::default()
            },
        );
    }

    /// Adds a vehicle-capable entity with the given seat catalog.
    pub fn spawn_vehicle(&mut self, id: Identifier, position: Position, seats: Vec<SeatEntry>) {
        debug_assert!(
            seats.len() <= MAX_VEHICLE_SEATS,
            "too many seats for vehicle {id}"
        );
        self.entities.insert(
            id,
            MockEntity {
                position,
                seats: Some(seats),
                ..MockEntity::default()
            },
        );
    }

    /// Removes an entity, releasing every binding it takes part in.
    pub fn despawn(&mut self, id: Identifier) {
        let Some(entity) = self.entities.remove(&id) else {
            return;
        };
        if let Some(binding) = entity.binding {
            if let Some(vehicle) = self.entities.get_mut(&binding.vehicle) {
                vehicle.occupants.remove(&binding.seat);
            }
        }
        for passenger in entity.occupants.values() {
            if let Some(passenger) = self.entities.get_mut(passenger) {
                passenger.binding = None;
                passenger.controlled = None;
            }
        }
    }

    /// Makes an accessory vehicle refuse every passenger.
    pub fn set_declines_passengers(&mut self, id: Identifier, declines: bool) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.declines_passengers = declines;
        }
    }

    /// Sets the control link directly.
    pub fn set_controlled(&mut self, id: Identifier, target: Option<Identifier>) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.controlled = target;
        }
    }

    /// Last movement update applied to an entity.
    #[must_use]
    pub fn last_movement(&self, id: Identifier) -> Option<MovementUpdate> {
        self.entities.get(&id).and_then(|entity| entity.last_movement)
    }

    /// Occupied seats of a vehicle, sorted by seat index.
    #[must_use]
    pub fn occupants(&self, vehicle: Identifier) -> Vec<(SeatIndex, Identifier)> {
        let mut occupants: Vec<_> = self
            .entities
            .get(&vehicle)
            .map(|entity| entity.occupants.iter().map(|(seat, id)| (*seat, *id)).collect())
            .unwrap_or_default();
        occupants.sort_unstable();
        occupants
    }

    /// Checks that every seat and every occupant agree on their binding.
    #[must_use]
    pub fn bindings_consistent(&self) -> bool {
        let seats_agree = self.entities.iter().all(|(vehicle, entity)| {
            entity.occupants.iter().all(|(seat, occupant)| {
                self.entities
                    .get(occupant)
                    .and_then(|o| o.binding)
                    .is_some_and(|b| b == SeatBinding::new(*vehicle, *seat))
            })
        });
        let occupants_agree = self.entities.iter().all(|(id, entity)| {
            entity.binding.map_or(true, |b| {
                self.entities
                    .get(&b.vehicle)
                    .and_then(|v| v.occupants.get(&b.seat))
                    == Some(id)
            })
        });
        seats_agree && occupants_agree
    }
}

impl EntityDirectory for MockEntityDirectory {
    fn exists(&self, id: Identifier) -> bool {
        self.entities.contains_key(&id)
    }

    fn seats(&self, vehicle: Identifier) -> Option<&[SeatEntry]> {
        self.entities.get(&vehicle)?.seats.as_deref()
    }

    fn seat_occupant(&self, vehicle: Identifier, seat: SeatIndex) -> Option<Identifier> {
        self.entities.get(&vehicle)?.occupants.get(&seat).copied()
    }

    fn set_seat_occupant(
        &mut self,
        vehicle: Identifier,
        seat: SeatIndex,
        occupant: Option<Identifier>,
    ) {
        if let Some(entity) = self.entities.get_mut(&vehicle) {
            match occupant {
                Some(occupant) => entity.occupants.insert(seat, occupant),
                None => entity.occupants.remove(&seat),
            };
        }
    }

    fn binding(&self, occupant: Identifier) -> Option<SeatBinding> {
        self.entities.get(&occupant)?.binding
    }

    fn set_binding(&mut self, occupant: Identifier, binding: Option<SeatBinding>) {
        let controls = binding.and_then(|b| {
            let seat = find_seat(self.seats(b.vehicle)?, b.seat)?;
            seat.can_control().then_some(b.vehicle)
        });
        if let Some(entity) = self.entities.get_mut(&occupant) {
            entity.binding = binding;
            entity.controlled = controls;
        }
    }

    fn controlled(&self, id: Identifier) -> Option<Identifier> {
        self.entities.get(&id)?.controlled
    }

    fn position(&self, id: Identifier) -> Option<Position> {
        self.entities.get(&id).map(|entity| entity.position)
    }

    fn apply_movement(&mut self, id: Identifier, update: &MovementUpdate) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = update.position();
            entity.last_movement = Some(*update);
        }
    }

    fn accepts_passenger(
        &self,
        accessory: Identifier,
        _passenger: Identifier,
        _seat: SeatIndex,
    ) -> bool {
        self.entities
            .get(&accessory)
            .is_some_and(|entity| !entity.declines_passengers)
    }
}

/// In-memory movement service with explicit positions and groups.
#[derive(Debug, Default)]
pub struct MockMovementService {
    positions: HashMap<Identifier, Position>,
    groups: HashMap<Identifier, u32>,
    now_ms: u32,
}

impl MockMovementService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places an entity on the (single) map.
    pub fn place(&mut self, id: Identifier, position: Position) {
        self.positions.insert(id, position);
    }

    /// Puts an entity into a group.
    pub fn join_group(&mut self, id: Identifier, group: u32) {
        self.groups.insert(id, group);
    }

    /// Sets the server clock.
    pub fn set_now_ms(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
    }
}

impl MovementService for MockMovementService {
    fn within_distance(&self, a: Identifier, b: Identifier, range: f32) -> bool {
        match (self.positions.get(&a), self.positions.get(&b)) {
            (Some(pa), Some(pb)) => pa.is_within(*pb, range),
            _ => false,
        }
    }

    fn in_group_with(&self, a: Identifier, b: Identifier) -> bool {
        match (self.groups.get(&a), self.groups.get(&b)) {
            (Some(ga), Some(gb)) => ga == gb,
            _ => false,
        }
    }

    fn now_ms(&self) -> u32 {
        self.now_ms
    }
}

/// A broadcast captured by [`MockBroadcaster`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPacket {
    /// Origin entity.
    pub origin: Identifier,
    /// Encoded notification.
    pub packet: Vec<u8>,
    /// Audience.
    pub recipients: Recipients,
}

/// A dismount captured by [`MockBroadcaster`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dismount {
    /// Occupant that left.
    pub occupant: Identifier,
    /// Seat it left.
    pub from: SeatBinding,
    /// Where it stands now.
    pub position: Position,
}

/// Broadcaster that records everything for inspection.
#[derive(Debug, Default)]
pub struct MockBroadcaster {
    sent: Vec<SentPacket>,
    dismounts: Vec<Dismount>,
}

impl MockBroadcaster {
    /// Creates an empty broadcaster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets all broadcast packets.
    #[must_use]
    pub fn sent(&self) -> &[SentPacket] {
        &self.sent
    }

    /// Gets all dismount signals.
    #[must_use]
    pub fn dismounts(&self) -> &[Dismount] {
        &self.dismounts
    }
}

impl PresenceBroadcaster for MockBroadcaster {
    fn send_to_set(&mut self, origin: Identifier, packet: &[u8], recipients: Recipients) {
        self.sent.push(SentPacket {
            origin,
            packet: packet.to_vec(),
            recipients,
        });
    }

    fn occupant_dismounted(&mut self, occupant: Identifier, from: SeatBinding, position: Position) {
        self.dismounts.push(Dismount {
            occupant,
            from,
            position,
        });
    }
}

/// Effect ledger backed by a map.
#[derive(Debug, Default)]
pub struct MockEffectLedger {
    records: HashMap<Identifier, Vec<u32>>,
}

impl MockEffectLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a "set vehicle id" effect.
    pub fn apply(&mut self, id: Identifier, record_id: u32) {
        self.records.entry(id).or_default().push(record_id);
    }
}

impl EffectLedger for MockEffectLedger {
    fn vehicle_record_ids(&self, id: Identifier) -> Vec<u32> {
        self.records.get(&id).cloned().unwrap_or_default()
    }
}
