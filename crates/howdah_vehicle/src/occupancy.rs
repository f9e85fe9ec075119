//! # Occupancy Controller
//!
//! The only code that binds and unbinds occupants.
//!
//! ## State Machine (per occupant)
//!
//! ```text
//!              enter                switch
//! Unmounted ──────────► Mounted(seat) ──────► Mounted(other seat)
//!     ▲                      │                       │
//!     └──────────────────────┴───── exit / eject ────┘
//! ```
//!
//! Every transition writes both halves of the binding (the seat's occupant
//! and the occupant's seat) before returning, so the two never disagree.

use howdah_shared::{Identifier, IdentifierKind, SeatIndex};

use crate::config::VehicleConfig;
use crate::error::{OccupancyError, OccupancyResult};
use crate::seat::{find_seat, neighbour_seat, SeatBinding, SeatEntry};
use crate::traits::{EntityDirectory, MovementService, PresenceBroadcaster};

/// Logs a diagnostic rejection unless reporting is disabled.
macro_rules! report {
    ($config:expr, $($arg:tt)*) => {
        if $config.report_rejections {
            tracing::warn!($($arg)*);
        }
    };
}

/// Destination of a seat switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchTarget {
    /// Seat before the current one, wrapping.
    Previous,
    /// Seat after the current one, wrapping.
    Next,
    /// Explicit seat of the current vehicle.
    Seat(SeatIndex),
    /// Seat of another vehicle-capable entity.
    Accessory {
        /// Accessory vehicle.
        vehicle: Identifier,
        /// Seat on the accessory.
        seat: SeatIndex,
    },
}

/// Result of a switch that was not rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Moved to another seat of the same vehicle.
    Moved(SeatBinding),
    /// Boarded an accessory vehicle.
    Boarded(SeatBinding),
    /// Target was the current seat; nothing changed.
    Unchanged,
    /// Accessory transfer attempted but had no effect.
    AccessoryDeclined,
}

/// Occupancy state transitions over borrowed collaborators.
pub struct OccupancyController<'a, D, M, B> {
    directory: &'a mut D,
    movement: &'a M,
    broadcaster: &'a mut B,
    config: &'a VehicleConfig,
}

impl<'a, D, M, B> OccupancyController<'a, D, M, B>
where
    D: EntityDirectory,
    M: MovementService,
    B: PresenceBroadcaster,
{
    /// Creates a controller for one request.
    pub fn new(
        directory: &'a mut D,
        movement: &'a M,
        broadcaster: &'a mut B,
        config: &'a VehicleConfig,
    ) -> Self {
        Self {
            directory,
            movement,
            broadcaster,
            config,
        }
    }

    /// Seat the occupant currently holds, with its catalog entry.
    #[must_use]
    pub fn current_seat(&self, occupant: Identifier) -> Option<(SeatBinding, SeatEntry)> {
        let binding = self.directory.binding(occupant)?;
        let seat = find_seat(self.directory.seats(binding.vehicle)?, binding.seat)?;
        Some((binding, seat))
    }

    /// Checks that the occupant sits in a seat it may switch away from.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::NotMounted`] if unbound,
    /// [`OccupancyError::SwitchNotPermitted`] if the seat forbids switching.
    pub fn ensure_can_switch(&self, occupant: Identifier) -> OccupancyResult<SeatBinding> {
        let (binding, seat) = self
            .current_seat(occupant)
            .ok_or(OccupancyError::NotMounted)?;
        if !seat.can_switch_from() {
            report!(
                self.config,
                "Occupant {} tried to switch seats but seat {} flags {:#x} don't permit that",
                occupant,
                seat.index,
                seat.flags.0
            );
            return Err(OccupancyError::SwitchNotPermitted);
        }
        Ok(binding)
    }

    /// Vehicle an ejector acts for: the one it is the base of, else the one
    /// it sits in.
    #[must_use]
    pub fn ejector_vehicle(&self, ejector: Identifier) -> Option<Identifier> {
        if self.directory.seats(ejector).is_some() {
            return Some(ejector);
        }
        self.directory.binding(ejector).map(|binding| binding.vehicle)
    }

    /// Returns true if `id` drives `vehicle`: it is the base entity or sits in
    /// a controlling seat of it.
    #[must_use]
    pub fn is_controller(&self, id: Identifier, vehicle: Identifier) -> bool {
        id == vehicle
            || self
                .current_seat(id)
                .is_some_and(|(binding, seat)| binding.vehicle == vehicle && seat.can_control())
    }

    fn bind(&mut self, occupant: Identifier, binding: SeatBinding) {
        self.directory
            .set_seat_occupant(binding.vehicle, binding.seat, Some(occupant));
        self.directory.set_binding(occupant, Some(binding));
    }

    /// Clears both halves of the occupant's binding, without notifying anyone.
    fn release(&mut self, occupant: Identifier) -> Option<SeatBinding> {
        let binding = self.directory.binding(occupant)?;
        if self.directory.seat_occupant(binding.vehicle, binding.seat) == Some(occupant) {
            self.directory
                .set_seat_occupant(binding.vehicle, binding.seat, None);
        }
        self.directory.set_binding(occupant, None);
        Some(binding)
    }

    /// Boards `occupant` into the first free enterable seat of `vehicle`.
    ///
    /// Any previous binding of the occupant is released first.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::TargetNotFound`] if the vehicle does not exist,
    /// [`OccupancyError::NotEligible`] if it has no vehicle capability, is the
    /// occupant itself, is out of group or range, or has no free seat.
    pub fn enter(
        &mut self,
        occupant: Identifier,
        vehicle: Identifier,
    ) -> OccupancyResult<SeatBinding> {
        if !self.directory.exists(vehicle) {
            return Err(OccupancyError::TargetNotFound);
        }
        if occupant == vehicle {
            return Err(OccupancyError::NotEligible);
        }
        if !self.movement.in_group_with(occupant, vehicle)
            || !self
                .movement
                .within_distance(occupant, vehicle, self.config.interaction_distance)
        {
            return Err(OccupancyError::NotEligible);
        }

        let seats = self
            .directory
            .seats(vehicle)
            .ok_or(OccupancyError::NotEligible)?;
        let seat = seats
            .iter()
            .filter(|seat| seat.can_enter_or_exit())
            .map(|seat| seat.index)
            .find(|&index| self.directory.seat_occupant(vehicle, index).is_none())
            .ok_or(OccupancyError::NotEligible)?;

        self.release(occupant);
        let binding = SeatBinding::new(vehicle, seat);
        self.bind(occupant, binding);
        tracing::debug!(
            "Occupant {} entered vehicle {} seat {}",
            occupant,
            vehicle,
            seat
        );
        Ok(binding)
    }

    /// Unbinds the occupant and signals the broadcaster with its position.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::NotMounted`] if the occupant holds no seat.
    pub fn exit_current(&mut self, occupant: Identifier) -> OccupancyResult<SeatBinding> {
        let binding = self.release(occupant).ok_or(OccupancyError::NotMounted)?;
        let position = self
            .directory
            .position(occupant)
            .or_else(|| self.directory.position(binding.vehicle))
            .unwrap_or_default();
        self.broadcaster
            .occupant_dismounted(occupant, binding, position);
        tracing::info!(
            "Occupant {} left vehicle {} seat {}",
            occupant,
            binding.vehicle,
            binding.seat
        );
        Ok(binding)
    }

    /// Moves the occupant to another seat, or hands it to an accessory.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::NotMounted`] / [`OccupancyError::SwitchNotPermitted`]
    /// from the precondition (which applies to every target, accessories
    /// included), then for same-vehicle targets
    /// [`OccupancyError::InvalidSeat`] or [`OccupancyError::SeatOccupied`].
    /// Accessory failures are not errors; they yield
    /// [`SwitchOutcome::AccessoryDeclined`].
    pub fn switch(
        &mut self,
        occupant: Identifier,
        target: SwitchTarget,
    ) -> OccupancyResult<SwitchOutcome> {
        let current = self.ensure_can_switch(occupant)?;

        let seat = match target {
            SwitchTarget::Accessory { vehicle, seat } => {
                return Ok(self.board_accessory(occupant, vehicle, seat));
            }
            SwitchTarget::Seat(seat) => seat,
            SwitchTarget::Previous | SwitchTarget::Next => {
                let seats = self
                    .directory
                    .seats(current.vehicle)
                    .ok_or(OccupancyError::InvalidSeat)?;
                neighbour_seat(seats, current.seat, target == SwitchTarget::Next)
                    .ok_or(OccupancyError::InvalidSeat)?
            }
        };

        let seats = self
            .directory
            .seats(current.vehicle)
            .ok_or(OccupancyError::InvalidSeat)?;
        if find_seat(seats, seat).is_none() {
            return Err(OccupancyError::InvalidSeat);
        }
        if seat == current.seat {
            return Ok(SwitchOutcome::Unchanged);
        }
        if self.directory.seat_occupant(current.vehicle, seat).is_some() {
            return Err(OccupancyError::SeatOccupied);
        }

        self.release(occupant);
        let binding = SeatBinding::new(current.vehicle, seat);
        self.bind(occupant, binding);
        tracing::debug!(
            "Occupant {} moved from seat {} to seat {} of vehicle {}",
            occupant,
            current.seat,
            seat,
            current.vehicle
        );
        Ok(SwitchOutcome::Moved(binding))
    }

    /// Best-effort transfer to a seat of another vehicle-capable entity.
    ///
    /// An occupant never boards itself, nor an accessory that is seated in it.
    fn board_accessory(
        &mut self,
        occupant: Identifier,
        accessory: Identifier,
        seat: SeatIndex,
    ) -> SwitchOutcome {
        let carried_by_occupant = self
            .directory
            .binding(accessory)
            .is_some_and(|binding| binding.vehicle == occupant);
        if accessory == occupant || carried_by_occupant {
            return SwitchOutcome::AccessoryDeclined;
        }
        let Some(seats) = self.directory.seats(accessory) else {
            return SwitchOutcome::AccessoryDeclined;
        };
        if find_seat(seats, seat).is_none()
            || self.directory.seat_occupant(accessory, seat).is_some()
            || !self.directory.accepts_passenger(accessory, occupant, seat)
        {
            return SwitchOutcome::AccessoryDeclined;
        }

        self.release(occupant);
        let binding = SeatBinding::new(accessory, seat);
        self.bind(occupant, binding);
        tracing::debug!(
            "Occupant {} boarded accessory {} seat {}",
            occupant,
            accessory,
            seat
        );
        SwitchOutcome::Boarded(binding)
    }

    /// Removes `target` from the ejector's vehicle.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::NotMounted`] if the ejector has no vehicle,
    /// [`OccupancyError::MalformedRequest`] if the identifier names neither a
    /// player nor a unit, [`OccupancyError::TargetNotFound`],
    /// [`OccupancyError::NotCoOccupant`], [`OccupancyError::SeatNotEjectable`],
    /// and for non-player targets [`OccupancyError::EjectorNotController`].
    pub fn eject(
        &mut self,
        ejector: Identifier,
        target: Identifier,
    ) -> OccupancyResult<SeatBinding> {
        let Some(vehicle) = self.ejector_vehicle(ejector) else {
            report!(
                self.config,
                "Eject: occupant {} is not in a vehicle",
                ejector
            );
            return Err(OccupancyError::NotMounted);
        };

        let kind = target.kind();
        if kind != IdentifierKind::Player && !kind.is_unit() {
            report!(
                self.config,
                "Eject: occupant {} named invalid identifier {}",
                ejector,
                target
            );
            return Err(OccupancyError::MalformedRequest);
        }

        if !self.directory.exists(target) {
            report!(
                self.config,
                "Occupant {} tried to eject {} but it was not found in world",
                ejector,
                target
            );
            return Err(OccupancyError::TargetNotFound);
        }

        let Some((binding, seat)) = self
            .current_seat(target)
            .filter(|(binding, _)| binding.vehicle == vehicle)
        else {
            report!(
                self.config,
                "Occupant {} tried to eject {} but they are not in the same vehicle",
                ejector,
                target
            );
            return Err(OccupancyError::NotCoOccupant);
        };

        if !seat.is_ejectable() {
            report!(
                self.config,
                "Occupant {} attempted to eject {} from non-ejectable seat {}",
                ejector,
                target,
                binding.seat
            );
            return Err(OccupancyError::SeatNotEjectable);
        }

        if kind.is_unit() && !self.is_controller(ejector, vehicle) {
            report!(
                self.config,
                "Occupant {} attempted to eject unit {} without controlling vehicle {}",
                ejector,
                target,
                vehicle
            );
            return Err(OccupancyError::EjectorNotController);
        }

        self.exit_current(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatFlags;
    use crate::traits::{MockBroadcaster, MockEntityDirectory, MockMovementService};
    use howdah_shared::Position;

    const CAR: Identifier = Identifier::vehicle(10, 1);
    const DRIVER: Identifier = Identifier::player(1);
    const RIDER: Identifier = Identifier::player(2);

    struct Fixture {
        directory: MockEntityDirectory,
        movement: MockMovementService,
        broadcaster: MockBroadcaster,
        config: VehicleConfig,
    }

    impl Fixture {
        fn new(seats: Vec<SeatEntry>) -> Self {
            let mut directory = MockEntityDirectory::new();
            let mut movement = MockMovementService::new();
            directory.spawn_vehicle(CAR, Position::ORIGIN, seats);
            movement.place(CAR, Position::ORIGIN);
            movement.join_group(CAR, 1);
            for id in [DRIVER, RIDER] {
                directory.spawn(id, Position::new(1.0, 0.0, 0.0));
                movement.place(id, Position::new(1.0, 0.0, 0.0));
                movement.join_group(id, 1);
            }
            Self {
                directory,
                movement,
                broadcaster: MockBroadcaster::new(),
                config: VehicleConfig::default(),
            }
        }

        fn controller(
            &mut self,
        ) -> OccupancyController<'_, MockEntityDirectory, MockMovementService, MockBroadcaster> {
            OccupancyController::new(
                &mut self.directory,
                &self.movement,
                &mut self.broadcaster,
                &self.config,
            )
        }
    }

    fn four_seats() -> Vec<SeatEntry> {
        (0..4).map(|i| SeatEntry::new(i, SeatFlags::PASSENGER)).collect()
    }

    #[test]
    fn test_enter_takes_first_free_enterable_seat() {
        let mut seats = four_seats();
        seats[0].flags = SeatFlags::NONE;
        let mut fx = Fixture::new(seats);

        assert_eq!(
            fx.controller().enter(DRIVER, CAR),
            Ok(SeatBinding::new(CAR, 1))
        );
        assert_eq!(
            fx.controller().enter(RIDER, CAR),
            Ok(SeatBinding::new(CAR, 2))
        );
        assert!(fx.directory.bindings_consistent());
    }

    #[test]
    fn test_enter_requires_group_and_range() {
        let mut fx = Fixture::new(four_seats());
        fx.movement.join_group(RIDER, 2);
        assert_eq!(
            fx.controller().enter(RIDER, CAR),
            Err(OccupancyError::NotEligible)
        );

        fx.movement.join_group(RIDER, 1);
        fx.movement.place(RIDER, Position::new(50.0, 0.0, 0.0));
        assert_eq!(
            fx.controller().enter(RIDER, CAR),
            Err(OccupancyError::NotEligible)
        );
        assert_eq!(fx.directory.binding(RIDER), None);
    }

    #[test]
    fn test_enter_full_vehicle_is_not_eligible() {
        let mut fx = Fixture::new(vec![SeatEntry::new(0, SeatFlags::PASSENGER)]);
        fx.controller().enter(DRIVER, CAR).unwrap();
        assert_eq!(
            fx.controller().enter(RIDER, CAR),
            Err(OccupancyError::NotEligible)
        );
    }

    #[test]
    fn test_enter_non_vehicle_is_not_eligible() {
        let mut fx = Fixture::new(four_seats());
        assert_eq!(
            fx.controller().enter(RIDER, DRIVER),
            Err(OccupancyError::NotEligible)
        );
        assert_eq!(
            fx.controller().enter(RIDER, Identifier::player(99)),
            Err(OccupancyError::TargetNotFound)
        );
    }

    #[test]
    fn test_exit_unmounted() {
        let mut fx = Fixture::new(four_seats());
        assert_eq!(
            fx.controller().exit_current(RIDER),
            Err(OccupancyError::NotMounted)
        );
        assert!(fx.broadcaster.dismounts().is_empty());
    }

    #[test]
    fn test_exit_signals_last_position() {
        let mut fx = Fixture::new(four_seats());
        let binding = fx.controller().enter(RIDER, CAR).unwrap();
        assert_eq!(fx.controller().exit_current(RIDER), Ok(binding));

        let dismount = fx.broadcaster.dismounts()[0];
        assert_eq!(dismount.occupant, RIDER);
        assert_eq!(dismount.position, Position::new(1.0, 0.0, 0.0));
        assert!(fx.directory.occupants(CAR).is_empty());
        assert!(fx.directory.bindings_consistent());
    }

    #[test]
    fn test_switch_next_wraps_and_detects_occupied() {
        let mut fx = Fixture::new(four_seats());
        fx.controller().enter(DRIVER, CAR).unwrap(); // seat 0
        fx.controller().enter(RIDER, CAR).unwrap(); // seat 1

        assert_eq!(
            fx.controller().switch(RIDER, SwitchTarget::Previous),
            Err(OccupancyError::SeatOccupied)
        );
        assert_eq!(
            fx.controller().switch(DRIVER, SwitchTarget::Previous),
            Ok(SwitchOutcome::Moved(SeatBinding::new(CAR, 3)))
        );
        assert_eq!(
            fx.controller().switch(DRIVER, SwitchTarget::Next),
            Ok(SwitchOutcome::Moved(SeatBinding::new(CAR, 0)))
        );
        assert!(fx.directory.bindings_consistent());
    }

    #[test]
    fn test_switch_explicit_seat() {
        let mut fx = Fixture::new(four_seats());
        fx.controller().enter(RIDER, CAR).unwrap();
        assert_eq!(
            fx.controller().switch(RIDER, SwitchTarget::Seat(9)),
            Err(OccupancyError::InvalidSeat)
        );
        assert_eq!(
            fx.controller().switch(RIDER, SwitchTarget::Seat(0)),
            Ok(SwitchOutcome::Unchanged)
        );
        assert_eq!(
            fx.controller().switch(RIDER, SwitchTarget::Seat(2)),
            Ok(SwitchOutcome::Moved(SeatBinding::new(CAR, 2)))
        );
        assert_eq!(fx.directory.occupants(CAR), vec![(2, RIDER)]);
    }

    #[test]
    fn test_locked_seat_blocks_every_switch() {
        let mut seats = four_seats();
        seats[0].flags = SeatFlags::PASSENGER.without(SeatFlags::CAN_SWITCH);
        let mut fx = Fixture::new(seats);
        let other = Identifier::vehicle(11, 2);
        fx.directory.spawn_vehicle(other, Position::ORIGIN, four_seats());
        fx.controller().enter(RIDER, CAR).unwrap();

        for target in [
            SwitchTarget::Next,
            SwitchTarget::Previous,
            SwitchTarget::Seat(2),
            SwitchTarget::Accessory {
                vehicle: other,
                seat: 0,
            },
        ] {
            assert_eq!(
                fx.controller().switch(RIDER, target),
                Err(OccupancyError::SwitchNotPermitted)
            );
        }
        assert_eq!(fx.directory.binding(RIDER), Some(SeatBinding::new(CAR, 0)));
    }

    #[test]
    fn test_accessory_boarding_is_best_effort() {
        let mut fx = Fixture::new(four_seats());
        let tower = Identifier::vehicle(12, 3);
        fx.directory.spawn_vehicle(
            tower,
            Position::ORIGIN,
            vec![SeatEntry::new(0, SeatFlags::PASSENGER)],
        );
        fx.controller().enter(RIDER, CAR).unwrap();

        let to_tower = SwitchTarget::Accessory {
            vehicle: tower,
            seat: 0,
        };
        let no_kit = SwitchTarget::Accessory {
            vehicle: DRIVER,
            seat: 0,
        };
        let bad_seat = SwitchTarget::Accessory {
            vehicle: tower,
            seat: 5,
        };
        assert_eq!(
            fx.controller().switch(RIDER, no_kit),
            Ok(SwitchOutcome::AccessoryDeclined)
        );
        assert_eq!(
            fx.controller().switch(RIDER, bad_seat),
            Ok(SwitchOutcome::AccessoryDeclined)
        );

        fx.directory.set_declines_passengers(tower, true);
        assert_eq!(
            fx.controller().switch(RIDER, to_tower),
            Ok(SwitchOutcome::AccessoryDeclined)
        );
        assert_eq!(fx.directory.binding(RIDER), Some(SeatBinding::new(CAR, 0)));

        fx.directory.set_declines_passengers(tower, false);
        assert_eq!(
            fx.controller().switch(RIDER, to_tower),
            Ok(SwitchOutcome::Boarded(SeatBinding::new(tower, 0)))
        );
        assert!(fx.directory.occupants(CAR).is_empty());
        assert!(fx.directory.bindings_consistent());
    }

    #[test]
    fn test_accessory_never_boards_itself_or_its_own_passenger() {
        let mut fx = Fixture::new(four_seats());
        let mount = Identifier::player(50);
        let turret = Identifier::vehicle(13, 4);
        let one_seat = vec![SeatEntry::new(0, SeatFlags::PASSENGER)];
        for id in [mount, turret] {
            fx.directory.spawn_vehicle(id, Position::new(1.0, 0.0, 0.0), one_seat.clone());
            fx.movement.place(id, Position::new(1.0, 0.0, 0.0));
            fx.movement.join_group(id, 1);
        }
        fx.controller().enter(mount, CAR).unwrap();
        fx.controller().enter(turret, mount).unwrap();

        let itself = SwitchTarget::Accessory {
            vehicle: mount,
            seat: 0,
        };
        assert_eq!(
            fx.controller().switch(mount, itself),
            Ok(SwitchOutcome::AccessoryDeclined)
        );

        let own_passenger = SwitchTarget::Accessory {
            vehicle: turret,
            seat: 0,
        };
        assert_eq!(
            fx.controller().switch(mount, own_passenger),
            Ok(SwitchOutcome::AccessoryDeclined)
        );

        assert_eq!(fx.directory.binding(mount), Some(SeatBinding::new(CAR, 0)));
        assert_eq!(fx.directory.occupants(mount), vec![(0, turret)]);
        assert!(fx.directory.occupants(turret).is_empty());
        assert!(fx.directory.bindings_consistent());
    }

    #[test]
    fn test_eject_rules() {
        let mut seats = four_seats();
        seats[0].flags = SeatFlags::DRIVER;
        seats[3].flags = SeatFlags::PASSENGER.without(SeatFlags::EJECTABLE);
        let mut fx = Fixture::new(seats);
        let gunner = Identifier::creature(50, 9);
        fx.directory.spawn(gunner, Position::ORIGIN);

        fx.controller().enter(DRIVER, CAR).unwrap(); // seat 0 (driver)
        fx.controller().enter(RIDER, CAR).unwrap(); // seat 1
        fx.controller().switch(RIDER, SwitchTarget::Seat(3)).unwrap();
        fx.movement.place(gunner, Position::ORIGIN);
        fx.movement.join_group(gunner, 1);
        fx.controller().enter(gunner, CAR).unwrap(); // seat 1

        assert_eq!(
            fx.controller().eject(RIDER, gunner),
            Err(OccupancyError::EjectorNotController)
        );
        assert_eq!(
            fx.controller().eject(DRIVER, RIDER),
            Err(OccupancyError::SeatNotEjectable)
        );
        assert_eq!(
            fx.controller().eject(DRIVER, gunner),
            Ok(SeatBinding::new(CAR, 1))
        );
        assert_eq!(
            fx.controller().eject(DRIVER, gunner),
            Err(OccupancyError::NotCoOccupant)
        );
        assert_eq!(
            fx.controller().eject(DRIVER, Identifier::player(77)),
            Err(OccupancyError::TargetNotFound)
        );
        assert_eq!(
            fx.controller().eject(DRIVER, Identifier::from_parts(0x4000, 0, 1)),
            Err(OccupancyError::MalformedRequest)
        );
        assert!(fx.directory.bindings_consistent());
    }

    #[test]
    fn test_vehicle_base_controls_itself() {
        let mut fx = Fixture::new(four_seats());
        let gunner = Identifier::creature(50, 9);
        fx.directory.spawn(gunner, Position::ORIGIN);
        fx.movement.place(gunner, Position::ORIGIN);
        fx.movement.join_group(gunner, 1);
        fx.controller().enter(gunner, CAR).unwrap();

        assert_eq!(
            fx.controller().eject(DRIVER, gunner),
            Err(OccupancyError::NotMounted)
        );
        assert_eq!(
            fx.controller().eject(CAR, gunner),
            Ok(SeatBinding::new(CAR, 0))
        );
    }
}
