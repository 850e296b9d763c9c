//! Field3D typed layer over Ogawa groups.
//!
//! Everything persisted here follows a few fixed conventions:
//!
//! - one value per dataset, raw in-memory bytes
//! - a type tag dataset ([`OgDataType`] as `i32`) placed just before a
//!   value makes it self-describing
//! - strings are a u64 LE byte length followed by UTF-8 bytes
//! - dataset 0 of a named group is its name string
//!
//! All container reads go through the single channel [`OGAWA_THREAD`].

mod base;
mod data_type;
mod group_type;
mod io;
mod value;

pub use base::*;
pub use data_type::*;
pub use group_type::*;
pub use io::*;
pub use value::*;

/// Read channel used for every container access.
pub const OGAWA_THREAD: usize = 0;

/// First child index used for payload by Field3D group writers.
pub const OGAWA_START_ID: u64 = 2;

/// Child offset of the first dataset in a Field3D dataset group.
pub const OGAWA_DATASET_BASEOFFSET: u64 = 3;

/// Marker for "no dataset".
pub const OGAWA_INVALID_DATASET_INDEX: i64 = -1;
