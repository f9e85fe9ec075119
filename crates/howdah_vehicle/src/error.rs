//! # Occupancy Error Types
//!
//! All rejections a vehicle request can end in.

use thiserror::Error;

/// Reasons a vehicle request is rejected.
///
/// Every variant is terminal for the current request and none is fatal to
/// the connection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyError {
    /// Occupant or vehicle does not meet the boarding conditions.
    #[error("not eligible for this vehicle action")]
    NotEligible,

    /// Occupant is not bound to any vehicle.
    #[error("occupant is not mounted")]
    NotMounted,

    /// Current seat does not allow switching away from it.
    #[error("current seat does not permit switching")]
    SwitchNotPermitted,

    /// Target seat already holds an occupant.
    #[error("seat is occupied")]
    SeatOccupied,

    /// Seat index is not part of the vehicle.
    #[error("seat index is not valid for this vehicle")]
    InvalidSeat,

    /// Named entity does not currently exist.
    #[error("target entity not found")]
    TargetNotFound,

    /// Target is not seated in the requester's vehicle.
    #[error("target is not a passenger of the same vehicle")]
    NotCoOccupant,

    /// Target's seat cannot be ejected from.
    #[error("seat is not ejectable")]
    SeatNotEjectable,

    /// Only the vehicle's controller may eject non-player passengers.
    #[error("only the vehicle controller may eject this passenger")]
    EjectorNotController,

    /// Payload was truncated or named an invalid identifier.
    #[error("malformed request")]
    MalformedRequest,
}

/// Result type for occupancy operations.
pub type OccupancyResult<T> = Result<T, OccupancyError>;

/// Errors raised while loading [`crate::config::VehicleConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
