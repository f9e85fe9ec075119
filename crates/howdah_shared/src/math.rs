//! Spatial types shared between the codec and the occupancy core.

use std::ops::Sub;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// World-space position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Position {
    /// Origin
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new position
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance squared (avoids sqrt)
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let d = self - other;
        d.x * d.x + d.y * d.y + d.z * d.z
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Returns true if `other` lies within `range` of this point.
    #[must_use]
    pub fn is_within(self, other: Self, range: f32) -> bool {
        self.distance_squared(other) <= range * range
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
