//! # Seat Permission Model
//!
//! Seat catalog entries and the pure capability checks over them.
//!
//! ## Capability Flags
//!
//! ```text
//! CAN_ENTER_OR_EXIT  occupant may board into / leave from this seat
//! CAN_SWITCH         occupant may move away from this seat
//! EJECTABLE          occupant may be removed by someone else
//! CAN_CONTROL        occupant drives the vehicle
//! ```

use howdah_shared::{Identifier, SeatIndex};

/// Capability flag set of one seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SeatFlags(pub u32);

impl SeatFlags {
    /// No capabilities.
    pub const NONE: Self = Self(0);
    /// Occupant drives the vehicle.
    pub const CAN_CONTROL: Self = Self(1 << 0);
    /// Occupant may board into / leave from this seat.
    pub const CAN_ENTER_OR_EXIT: Self = Self(1 << 1);
    /// Occupant may switch away from this seat.
    pub const CAN_SWITCH: Self = Self(1 << 2);
    /// Occupant may be ejected by another entity.
    pub const EJECTABLE: Self = Self(1 << 3);
    /// Typical passenger seat.
    pub const PASSENGER: Self = Self::CAN_ENTER_OR_EXIT
        .with(Self::CAN_SWITCH)
        .with(Self::EJECTABLE);
    /// Typical driver seat.
    pub const DRIVER: Self = Self::CAN_CONTROL
        .with(Self::CAN_ENTER_OR_EXIT)
        .with(Self::CAN_SWITCH);

    /// Returns true if every flag in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[inline]
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// This set with `other` cleared.
    #[inline]
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

/// One seat in a vehicle's seat catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatEntry {
    /// Seat index within the vehicle.
    pub index: SeatIndex,
    /// Capability flags.
    pub flags: SeatFlags,
}

impl SeatEntry {
    /// Creates a catalog entry.
    #[must_use]
    pub const fn new(index: SeatIndex, flags: SeatFlags) -> Self {
        Self { index, flags }
    }

    /// Occupant may board into or leave from this seat.
    #[inline]
    #[must_use]
    pub const fn can_enter_or_exit(&self) -> bool {
        self.flags.contains(SeatFlags::CAN_ENTER_OR_EXIT)
    }

    /// Occupant may switch away from this seat.
    #[inline]
    #[must_use]
    pub const fn can_switch_from(&self) -> bool {
        self.flags.contains(SeatFlags::CAN_SWITCH)
    }

    /// Occupant may be ejected by another entity.
    #[inline]
    #[must_use]
    pub const fn is_ejectable(&self) -> bool {
        self.flags.contains(SeatFlags::EJECTABLE)
    }

    /// Occupant drives the vehicle.
    #[inline]
    #[must_use]
    pub const fn can_control(&self) -> bool {
        self.flags.contains(SeatFlags::CAN_CONTROL)
    }
}

/// Where an occupant sits: one seat of one vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeatBinding {
    /// Vehicle (base entity) the seat belongs to.
    pub vehicle: Identifier,
    /// Seat index within the vehicle.
    pub seat: SeatIndex,
}

impl SeatBinding {
    /// Creates a binding.
    #[must_use]
    pub const fn new(vehicle: Identifier, seat: SeatIndex) -> Self {
        Self { vehicle, seat }
    }
}

/// Finds a seat in a catalog.
#[must_use]
pub fn find_seat(seats: &[SeatEntry], index: SeatIndex) -> Option<SeatEntry> {
    seats.iter().find(|seat| seat.index == index).copied()
}

/// Seat before or after `current` in catalog order, wrapping around.
#[must_use]
pub fn neighbour_seat(seats: &[SeatEntry], current: SeatIndex, forward: bool) -> Option<SeatIndex> {
    let position = seats.iter().position(|seat| seat.index == current)?;
    let count = seats.len();
    let next = if forward {
        (position + 1) % count
    } else {
        (position + count - 1) % count
    };
    Some(seats[next].index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_checks() {
        assert_eq!(SeatFlags::PASSENGER, SeatFlags(0b1110));
        assert_eq!(SeatFlags::DRIVER, SeatFlags(0b0111));
        assert!(
            SeatFlags::NONE.with(SeatFlags::EJECTABLE).contains(SeatFlags::EJECTABLE)
        );

        let seat = SeatEntry::new(0, SeatFlags::PASSENGER);
        assert!(seat.can_enter_or_exit());
        assert!(seat.can_switch_from());
        assert!(seat.is_ejectable());
        assert!(!seat.can_control());

        let locked = SeatEntry::new(1, SeatFlags::PASSENGER.without(SeatFlags::CAN_SWITCH));
        assert!(!locked.can_switch_from());
        assert!(locked.is_ejectable());

        assert!(!SeatEntry::new(2, SeatFlags::NONE).can_enter_or_exit());
        assert!(SeatEntry::new(3, SeatFlags::DRIVER).can_control());
    }

    #[test]
    fn test_neighbour_wraps() {
        let seats: Vec<SeatEntry> = (0..4)
            .map(|i| SeatEntry::new(i, SeatFlags::PASSENGER))
            .collect();
        assert_eq!(neighbour_seat(&seats, 2, true), Some(3));
        assert_eq!(neighbour_seat(&seats, 3, true), Some(0));
        assert_eq!(neighbour_seat(&seats, 0, false), Some(3));
        assert_eq!(neighbour_seat(&seats, 7, true), None);
    }

    #[test]
    fn test_neighbour_follows_catalog_order() {
        let seats = [
            SeatEntry::new(0, SeatFlags::DRIVER),
            SeatEntry::new(4, SeatFlags::PASSENGER),
            SeatEntry::new(6, SeatFlags::PASSENGER),
        ];
        assert_eq!(neighbour_seat(&seats, 0, true), Some(4));
        assert_eq!(neighbour_seat(&seats, 4, false), Some(0));
        assert_eq!(find_seat(&seats, 6), Some(seats[2]));
        assert_eq!(find_seat(&seats, 5), None);
    }
}
