//! # Vehicle Protocol Handler
//!
//! One inbound request per call: decode, resolve, check seat permissions,
//! mutate occupancy, broadcast.
//!
//! ## Framing Hygiene
//!
//! Every request consumes its whole payload, whether it is accepted,
//! rejected early or malformed. Trailing bytes never reach the next packet.
//!
//! ## Rejections
//!
//! Rejections come back as [`OccupancyError`] for the caller to inspect but
//! are never sent to the requester; the client's prediction simply goes
//! unconfirmed.

use howdah_protocol::{
    ChangeSeatPayload, DismissPayload, EjectPassengerPayload, EnterVehiclePayload, MovementUpdate,
    Notification, PacketReader, PacketWriter, RequestKind, SwitchSeatPayload, VehicleRecordId,
};
use howdah_shared::Identifier;

use crate::config::VehicleConfig;
use crate::error::{OccupancyError, OccupancyResult};
use crate::occupancy::{OccupancyController, SwitchOutcome, SwitchTarget};
use crate::seat::SeatBinding;
use crate::traits::{
    EffectLedger, EntityDirectory, MovementService, PresenceBroadcaster, Recipients,
};

/// What an accepted request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Dismissed the controlled vehicle and left the seat.
    Dismissed(SeatBinding),
    /// Seat change request handled.
    Switched(SwitchOutcome),
    /// Left the seat.
    Exited(SeatBinding),
    /// Boarded another player's vehicle.
    Entered(SeatBinding),
    /// Removed a passenger.
    Ejected {
        /// Passenger removed.
        target: Identifier,
        /// Seat it was removed from.
        from: SeatBinding,
    },
    /// Broadcast the requester's vehicle record id.
    RecordIdSent(u32),
}

/// Request orchestration over the four collaborators.
pub struct VehicleProtocolHandler<D, M, B, L> {
    directory: D,
    movement: M,
    broadcaster: B,
    ledger: L,
    config: VehicleConfig,
    writer: PacketWriter,
}

impl<D, M, B, L> VehicleProtocolHandler<D, M, B, L>
where
    D: EntityDirectory,
    M: MovementService,
    B: PresenceBroadcaster,
    L: EffectLedger,
{
    /// Creates a handler.
    pub fn new(
        directory: D,
        movement: M,
        broadcaster: B,
        ledger: L,
        config: VehicleConfig,
    ) -> Self {
        Self {
            directory,
            movement,
            broadcaster,
            ledger,
            config,
            writer: PacketWriter::new(),
        }
    }

    /// Entity directory.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Entity directory, mutably.
    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// Movement service.
    pub fn movement(&self) -> &M {
        &self.movement
    }

    /// Movement service, mutably.
    pub fn movement_mut(&mut self) -> &mut M {
        &mut self.movement
    }

    /// Presence broadcaster.
    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    /// Effect ledger, mutably.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Active configuration.
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Occupancy controller over this handler's collaborators.
    pub fn controller(&mut self) -> OccupancyController<'_, D, M, B> {
        OccupancyController::new(
            &mut self.directory,
            &self.movement,
            &mut self.broadcaster,
            &self.config,
        )
    }

    /// Handles one framed request: a [`RequestKind`] tag byte then payload.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::MalformedRequest`] for an empty frame or unknown tag,
    /// otherwise whatever [`Self::handle`] returns.
    pub fn handle_frame(
        &mut self,
        requester: Identifier,
        frame: &[u8],
    ) -> OccupancyResult<Outcome> {
        let mut reader = PacketReader::new(frame);
        let Some(kind) = reader.read_u8().and_then(RequestKind::from_u8) else {
            reader.skip_remaining();
            return Err(OccupancyError::MalformedRequest);
        };
        self.handle(requester, kind, &mut reader)
    }

    /// Handles one request. The payload is always fully consumed.
    ///
    /// # Errors
    ///
    /// Any [`OccupancyError`]. Seat bindings are untouched on every error.
    /// A Dismiss from an entity holding a control link but no seat still
    /// broadcasts and applies its landing update before failing with
    /// [`OccupancyError::NotMounted`].
    pub fn handle(
        &mut self,
        requester: Identifier,
        kind: RequestKind,
        payload: &mut PacketReader<'_>,
    ) -> OccupancyResult<Outcome> {
        tracing::debug!("Received {:?} from {}", kind, requester);
        let result = match kind {
            RequestKind::DismissControlledVehicle => self.handle_dismiss(requester, payload),
            RequestKind::ChangeSeatsOnControlledVehicle
            | RequestKind::RequestVehiclePrevSeat
            | RequestKind::RequestVehicleNextSeat
            | RequestKind::RequestVehicleSwitchSeat => {
                self.handle_change_seat(requester, kind, payload)
            }
            RequestKind::RequestVehicleExit => self.handle_request_exit(requester),
            RequestKind::EnterPlayerVehicle => self.handle_enter(requester, payload),
            RequestKind::EjectPassenger => self.handle_eject(requester, payload),
            RequestKind::SetVehicleRecId => self.handle_set_record_id(requester),
        };
        payload.skip_remaining();
        if let Err(err) = result {
            tracing::debug!("{:?} from {} rejected: {}", kind, requester, err);
        }
        result
    }

    fn handle_dismiss(
        &mut self,
        requester: Identifier,
        payload: &mut PacketReader<'_>,
    ) -> OccupancyResult<Outcome> {
        if self.directory.controlled(requester).is_none() {
            return Err(OccupancyError::NotMounted);
        }
        let DismissPayload { position } =
            DismissPayload::read(payload).ok_or(OccupancyError::MalformedRequest)?;

        let update = MovementUpdate::dismount(requester, position, self.movement.now_ms());
        if Notification::Move(update).serialize(&mut self.writer) {
            self.broadcaster
                .send_to_set(requester, self.writer.as_slice(), Recipients::OthersOnly);
        }
        self.directory.apply_movement(requester, &update);

        self.controller().exit_current(requester).map(Outcome::Dismissed)
    }

    fn handle_change_seat(
        &mut self,
        requester: Identifier,
        kind: RequestKind,
        payload: &mut PacketReader<'_>,
    ) -> OccupancyResult<Outcome> {
        let current = self.controller().ensure_can_switch(requester)?;

        let target = match kind {
            RequestKind::RequestVehiclePrevSeat => SwitchTarget::Previous,
            RequestKind::RequestVehicleNextSeat => SwitchTarget::Next,
            RequestKind::ChangeSeatsOnControlledVehicle => {
                let request =
                    ChangeSeatPayload::read(payload).ok_or(OccupancyError::MalformedRequest)?;
                if request.accessory.is_empty() {
                    if request.seat > 0 {
                        SwitchTarget::Next
                    } else {
                        SwitchTarget::Previous
                    }
                } else {
                    SwitchTarget::Accessory {
                        vehicle: request.accessory,
                        seat: request.seat,
                    }
                }
            }
            RequestKind::RequestVehicleSwitchSeat => {
                let request =
                    SwitchSeatPayload::read(payload).ok_or(OccupancyError::MalformedRequest)?;
                if request.vehicle == current.vehicle {
                    SwitchTarget::Seat(request.seat)
                } else {
                    SwitchTarget::Accessory {
                        vehicle: request.vehicle,
                        seat: request.seat,
                    }
                }
            }
            _ => return Err(OccupancyError::MalformedRequest),
        };

        self.controller().switch(requester, target).map(Outcome::Switched)
    }

    fn handle_request_exit(&mut self, requester: Identifier) -> OccupancyResult<Outcome> {
        let (binding, seat) = self
            .controller()
            .current_seat(requester)
            .ok_or(OccupancyError::NotMounted)?;
        if !seat.can_enter_or_exit() {
            if self.config.report_rejections {
                tracing::warn!(
                    "Occupant {} tried to exit vehicle {} but seat {} flags {:#x} forbid it",
                    requester,
                    binding.vehicle,
                    seat.index,
                    seat.flags.0
                );
            }
            return Err(OccupancyError::NotEligible);
        }
        self.controller().exit_current(requester).map(Outcome::Exited)
    }

    fn handle_enter(
        &mut self,
        requester: Identifier,
        payload: &mut PacketReader<'_>,
    ) -> OccupancyResult<Outcome> {
        let EnterVehiclePayload { target } =
            EnterVehiclePayload::read(payload).ok_or(OccupancyError::MalformedRequest)?;
        if !target.is_player() || !self.directory.exists(target) {
            return Err(OccupancyError::TargetNotFound);
        }
        self.controller().enter(requester, target).map(Outcome::Entered)
    }

    fn handle_eject(
        &mut self,
        requester: Identifier,
        payload: &mut PacketReader<'_>,
    ) -> OccupancyResult<Outcome> {
        if self.controller().ejector_vehicle(requester).is_none() {
            if self.config.report_rejections {
                tracing::warn!("Eject: occupant {} is not in a vehicle", requester);
            }
            return Err(OccupancyError::NotMounted);
        }
        let EjectPassengerPayload { target } =
            EjectPassengerPayload::read(payload).ok_or(OccupancyError::MalformedRequest)?;
        let from = self.controller().eject(requester, target)?;
        Ok(Outcome::Ejected { target, from })
    }

    fn handle_set_record_id(&mut self, requester: Identifier) -> OccupancyResult<Outcome> {
        let record_id = self
            .ledger
            .vehicle_record_ids(requester)
            .last()
            .copied()
            .unwrap_or(0);
        let notification = Notification::RecordId(VehicleRecordId {
            record_id,
            subject: requester,
        });
        if notification.serialize(&mut self.writer) {
            self.broadcaster
                .send_to_set(requester, self.writer.as_slice(), Recipients::IncludeSelf);
        }
        Ok(Outcome::RecordIdSent(record_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::{SeatEntry, SeatFlags};
    use crate::traits::{
        MockBroadcaster, MockEffectLedger, MockEntityDirectory, MockMovementService,
    };
    use howdah_shared::Position;

    type TestHandler = VehicleProtocolHandler<
        MockEntityDirectory,
        MockMovementService,
        MockBroadcaster,
        MockEffectLedger,
    >;

    const CAR: Identifier = Identifier::vehicle(10, 1);
    const PILOT: Identifier = Identifier::player(1);

    fn handler() -> TestHandler {
        let mut directory = MockEntityDirectory::new();
        let mut movement = MockMovementService::new();
        directory.spawn_vehicle(
            CAR,
            Position::ORIGIN,
            vec![
                SeatEntry::new(0, SeatFlags::DRIVER),
                SeatEntry::new(1, SeatFlags::PASSENGER),
            ],
        );
        directory.spawn(PILOT, Position::ORIGIN);
        for id in [CAR, PILOT] {
            movement.place(id, Position::ORIGIN);
            movement.join_group(id, 1);
        }
        VehicleProtocolHandler::new(
            directory,
            movement,
            MockBroadcaster::new(),
            MockEffectLedger::new(),
            VehicleConfig::default(),
        )
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let mut h = handler();
        assert_eq!(
            h.handle_frame(PILOT, &[200, 1, 2, 3]),
            Err(OccupancyError::MalformedRequest)
        );
        assert_eq!(
            h.handle_frame(PILOT, &[]),
            Err(OccupancyError::MalformedRequest)
        );
    }

    #[test]
    fn test_truncated_payload_is_consumed() {
        let mut h = handler();
        h.controller().enter(PILOT, CAR).unwrap();

        let data = [1u8, 2, 3];
        let mut reader = PacketReader::new(&data);
        let result = h.handle(
            PILOT,
            RequestKind::ChangeSeatsOnControlledVehicle,
            &mut reader,
        );
        assert_eq!(result, Err(OccupancyError::MalformedRequest));
        assert!(reader.is_finished());
        assert_eq!(h.directory().binding(PILOT), Some(SeatBinding::new(CAR, 0)));
    }

    #[test]
    fn test_controlling_seat_grants_dismiss() {
        let mut h = handler();
        h.controller().enter(PILOT, CAR).unwrap();
        assert_eq!(h.directory().controlled(PILOT), Some(CAR));

        let landing = Position::new(4.0, 5.0, 6.0);
        let mut writer = PacketWriter::new();
        assert!(DismissPayload { position: landing }.write(&mut writer));
        let mut reader = PacketReader::new(writer.as_slice());
        let result = h.handle(PILOT, RequestKind::DismissControlledVehicle, &mut reader);
        assert_eq!(result, Ok(Outcome::Dismissed(SeatBinding::new(CAR, 0))));
        assert_eq!(h.directory().controlled(PILOT), None);
    }

    #[test]
    fn test_dismiss_with_control_link_but_no_seat() {
        let mut h = handler();
        h.directory_mut().set_controlled(PILOT, Some(CAR));
        h.movement_mut().set_now_ms(99);

        let landing = Position::new(7.0, 8.0, 9.0);
        let mut writer = PacketWriter::new();
        assert!(DismissPayload { position: landing }.write(&mut writer));
        let mut reader = PacketReader::new(writer.as_slice());
        assert_eq!(
            h.handle(PILOT, RequestKind::DismissControlledVehicle, &mut reader),
            Err(OccupancyError::NotMounted)
        );
        assert!(reader.is_finished());

        // The landing update goes out before the missing seat is noticed.
        let update = h.directory().last_movement(PILOT).expect("movement applied");
        assert_eq!(update.position(), landing);
        assert_eq!(update.move_time, h.movement().now_ms());
        assert_eq!(h.broadcaster().sent().len(), 1);
        assert_eq!(h.broadcaster().sent()[0].recipients, Recipients::OthersOnly);
        assert!(h.broadcaster().dismounts().is_empty());
        assert!(h.directory().occupants(CAR).is_empty());
    }

    #[test]
    fn test_rejection_reports_can_be_silenced() {
        let mut config = VehicleConfig::from_toml_str("report_rejections = false").unwrap();
        config.interaction_distance = 2.0;
        let h = VehicleProtocolHandler::new(
            MockEntityDirectory::new(),
            MockMovementService::new(),
            MockBroadcaster::new(),
            MockEffectLedger::new(),
            config,
        );
        assert!(!h.config().report_rejections);
        assert!((h.config().interaction_distance - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_record_id_defaults_to_zero() {
        let mut h = handler();
        let mut reader = PacketReader::new(&[9, 9]);
        assert_eq!(
            h.handle(PILOT, RequestKind::SetVehicleRecId, &mut reader),
            Ok(Outcome::RecordIdSent(0))
        );
        assert!(reader.is_finished());
        assert_eq!(
            h.broadcaster().sent()[0].recipients,
            Recipients::IncludeSelf
        );
    }
}
