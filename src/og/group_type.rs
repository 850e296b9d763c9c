//! Roles an Ogawa group can play in a Field3D file.
//!
//! **Warning:** the numeric values are stored in files. Never reorder or
//! renumber them; append new kinds at the end.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OgGroupType {
    /// Plain nesting group
    Group = 0,
    /// Group holding attributes
    Attribute = 1,
    /// Group holding a dataset
    Dataset = 2,
}

impl OgGroupType {
    /// Map a stored code back to a group kind.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Group),
            1 => Some(Self::Attribute),
            2 => Some(Self::Dataset),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Attribute => "attribute",
            Self::Dataset => "dataset",
        }
    }
}

impl fmt::Display for OgGroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// String form of a stored group kind code; empty for unknown codes.
pub fn og_group_type_to_string(code: i32) -> &'static str {
    OgGroupType::from_i32(code).map_or("", OgGroupType::name)
}
