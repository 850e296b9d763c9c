//! Low-level Ogawa container format.
//!
//! Ogawa stores a tree of groups. Each group holds an ordered list of
//! children, and each child is either another group or an opaque data block.
//! This module only moves bytes; typing lives in [`crate::og`].
//!
//! ## File Structure
//!
//! ```text
//! +------------------+
//! | Magic: "Ogawa"   |  5 bytes
//! +------------------+
//! | Frozen flag      |  1 byte (0x00 or 0xFF)
//! +------------------+
//! | Version          |  2 bytes ({0, 1})
//! +------------------+
//! | Root Group Pos   |  8 bytes (u64 LE)
//! +------------------+
//! | Data blocks      |  u64 size + payload
//! | Groups           |  u64 count + u64 child offsets
//! +------------------+
//! ```

mod format;
mod reader;
pub mod writer;

pub use format::*;
pub use reader::*;
pub use writer::*;
