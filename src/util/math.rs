//! Vector value types stored by the typed layer.
//!
//! Single and double precision vectors come from `glam`. Half precision
//! vectors have no `glam` counterpart, so [`Vec3h`] is defined here with the
//! same tightly packed `x, y, z` layout.

pub use glam::{DVec3, Vec3};
pub use half::f16;

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// 3-component vector of 16-bit floats (6 bytes, no padding).
#[derive(Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec3h {
    pub x: f16,
    pub y: f16,
    pub z: f16,
}

impl Vec3h {
    /// All components zero.
    pub const ZERO: Self = Self {
        x: f16::ZERO,
        y: f16::ZERO,
        z: f16::ZERO,
    };

    #[inline]
    pub const fn new(x: f16, y: f16, z: f16) -> Self {
        Self { x, y, z }
    }

    /// Narrow a single precision vector, rounding each component.
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(f16::from_f32(v.x), f16::from_f32(v.y), f16::from_f32(v.z))
    }

    /// Widen to a single precision vector.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x.to_f32(), self.y.to_f32(), self.z.to_f32())
    }
}

impl From<Vec3> for Vec3h {
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v)
    }
}

impl From<Vec3h> for Vec3 {
    fn from(v: Vec3h) -> Self {
        v.to_vec3()
    }
}

impl fmt::Debug for Vec3h {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3h({}, {}, {})", self.x, self.y, self.z)
    }
}
