//! Utility types shared by the container and typed layers.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`Vec3h`] plus `glam` vector re-exports used as stored value types

mod error;
mod math;

pub use error::*;
pub use math::*;
