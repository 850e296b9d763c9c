//! # field3d-ogawa
//!
//! Typed value storage for Field3D files built on the Ogawa container format.
//!
//! Field3D and the Ogawa format were developed by Sony Pictures Imageworks.
//! This is an independent Rust implementation that keeps the on-disk type
//! codes and group conventions binary compatible.
//!
//! ## Modules
//!
//! - [`util`] - Errors and vector value types
//! - [`ogawa`] - Low-level Ogawa groups and datasets
//! - [`og`] - Type codes, typed read/write primitives, strings, group names
//!
//! ## Example
//!
//! ```no_run
//! use field3d_ogawa::og::{self, OgDataType};
//! use field3d_ogawa::ogawa::{IArchive, OArchive};
//!
//! # fn main() -> field3d_ogawa::Result<()> {
//! let archive = OArchive::create("field.f3d")?;
//! let group = archive.root().add_group()?;
//! og::write_string(&group, "field_density")?;
//! og::write_typed(&group, &42u32)?;
//! archive.close()?;
//!
//! let archive = IArchive::open("field.f3d")?;
//! let group = archive.root().group(0, og::OGAWA_THREAD)?;
//! assert_eq!(og::get_group_name(&group)?, "field_density");
//! assert_eq!(og::read_data_type(&group, 1)?, OgDataType::Uint32);
//! assert_eq!(og::read_data::<u32>(&group, 2)?, 42);
//! # Ok(())
//! # }
//! ```

pub mod util;
pub mod ogawa;
pub mod og;

pub use util::{Error, Result};
pub use og::{OgDataType, OgGroupType, OgIBase, OgValue, OgawaType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::og::*;
    pub use crate::ogawa::{IArchive, IGroup, OArchive, OGroup, ReadOptions};
    pub use crate::util::{DVec3, Error, Result, Vec3, Vec3h};
}
