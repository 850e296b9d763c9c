//! Persisted type codes and the value-type to type-code mapping.
//!
//! **Warning:** the numeric value of every [`OgDataType`] variant is stored
//! in files. Never reorder or renumber existing variants. New types are
//! appended after [`OgDataType::Vec64`] and [`NUM_DATA_TYPES`] is bumped;
//! [`OgDataType::Invalid`] stays at 127.

use bytemuck::Pod;
use half::f16;
use std::fmt;

use crate::util::{DVec3, Vec3, Vec3h};

/// Type code written in front of self-describing values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum OgDataType {
    Int8 = 0,
    Uint8 = 1,
    Int16 = 2,
    Uint16 = 3,
    Int32 = 4,
    Uint32 = 5,
    Int64 = 6,
    Uint64 = 7,
    Float16 = 8,
    Float32 = 9,
    Float64 = 10,
    Vec16 = 11,
    Vec32 = 12,
    Vec64 = 13,
    /// Unknown or unreadable type code
    #[default]
    Invalid = 127,
}

/// Number of live type codes (codes `0..NUM_DATA_TYPES`).
pub const NUM_DATA_TYPES: i32 = 14;

impl OgDataType {
    /// Every live type code, in code order.
    pub const ALL: [OgDataType; NUM_DATA_TYPES as usize] = [
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Float16,
        Self::Float32,
        Self::Float64,
        Self::Vec16,
        Self::Vec32,
        Self::Vec64,
    ];

    /// Map a stored code back to a type. Unknown codes become `Invalid`.
    pub const fn from_i32(code: i32) -> Self {
        match code {
            0 => Self::Int8,
            1 => Self::Uint8,
            2 => Self::Int16,
            3 => Self::Uint16,
            4 => Self::Int32,
            5 => Self::Uint32,
            6 => Self::Int64,
            7 => Self::Uint64,
            8 => Self::Float16,
            9 => Self::Float32,
            10 => Self::Float64,
            11 => Self::Vec16,
            12 => Self::Vec32,
            13 => Self::Vec64,
            _ => Self::Invalid,
        }
    }

    /// Stored code.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Size in bytes of one value of this type (0 for `Invalid`).
    pub const fn size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 | Self::Float16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 => 8,
            Self::Vec16 => 6,
            Self::Vec32 => 12,
            Self::Vec64 => 24,
            Self::Invalid => 0,
        }
    }

    /// Canonical type name, e.g. `"uint32_t"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8_t",
            Self::Uint8 => "uint8_t",
            Self::Int16 => "int16_t",
            Self::Uint16 => "uint16_t",
            Self::Int32 => "int32_t",
            Self::Uint32 => "uint32_t",
            Self::Int64 => "int64_t",
            Self::Uint64 => "uint64_t",
            Self::Float16 => "float16_t",
            Self::Float32 => "float32_t",
            Self::Float64 => "float64_t",
            Self::Vec16 => "vec16_t",
            Self::Vec32 => "vec32_t",
            Self::Vec64 => "vec64_t",
            Self::Invalid => "invalid",
        }
    }

    /// Parse a canonical type name. Unknown names become `Invalid`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap_or(Self::Invalid)
    }
}

impl fmt::Display for OgDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Value types the typed layer can store, with their type code and name.
///
/// Implemented only for the closed set of supported types.
pub trait OgawaType: Pod + Default + PartialEq + fmt::Debug + sealed::Sealed {
    /// Type code written by [`write_data_type`](super::write_data_type).
    const DATA_TYPE: OgDataType;
    /// Canonical name, identical to `DATA_TYPE.name()`.
    const TYPE_NAME: &'static str;
    /// Stored size in bytes.
    const SIZE: usize = std::mem::size_of::<Self>();
}

macro_rules! declare_og_traits {
    ($ty:ty, $code:ident, $name:literal) => {
        impl sealed::Sealed for $ty {}

        impl OgawaType for $ty {
            const DATA_TYPE: OgDataType = OgDataType::$code;
            const TYPE_NAME: &'static str = $name;
        }
    };
}

declare_og_traits!(i8, Int8, "int8_t");
declare_og_traits!(u8, Uint8, "uint8_t");
declare_og_traits!(i16, Int16, "int16_t");
declare_og_traits!(u16, Uint16, "uint16_t");
declare_og_traits!(i32, Int32, "int32_t");
declare_og_traits!(u32, Uint32, "uint32_t");
declare_og_traits!(i64, Int64, "int64_t");
declare_og_traits!(u64, Uint64, "uint64_t");
declare_og_traits!(f16, Float16, "float16_t");
declare_og_traits!(f32, Float32, "float32_t");
declare_og_traits!(f64, Float64, "float64_t");
declare_og_traits!(Vec3h, Vec16, "vec16_t");
declare_og_traits!(Vec3, Vec32, "vec32_t");
declare_og_traits!(DVec3, Vec64, "vec64_t");

/// Type code of `T`.
#[inline]
pub const fn code_for<T: OgawaType>() -> OgDataType {
    T::DATA_TYPE
}

/// Canonical name of `T`.
#[inline]
pub const fn name_for<T: OgawaType>() -> &'static str {
    T::TYPE_NAME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values_are_frozen() {
        let expected = [
            (OgDataType::Int8, 0),
            (OgDataType::Uint8, 1),
            (OgDataType::Int16, 2),
            (OgDataType::Uint16, 3),
            (OgDataType::Int32, 4),
            (OgDataType::Uint32, 5),
            (OgDataType::Int64, 6),
            (OgDataType::Uint64, 7),
            (OgDataType::Float16, 8),
            (OgDataType::Float32, 9),
            (OgDataType::Float64, 10),
            (OgDataType::Vec16, 11),
            (OgDataType::Vec32, 12),
            (OgDataType::Vec64, 13),
            (OgDataType::Invalid, 127),
        ];
        for (ty, code) in expected {
            assert_eq!(ty.code(), code, "{ty}");
            assert_eq!(OgDataType::from_i32(code), ty);
        }
        assert_eq!(NUM_DATA_TYPES, 14);
        assert_eq!(std::mem::size_of::<OgDataType>(), 4);
    }

    #[test]
    fn test_all_is_in_code_order() {
        for (i, ty) in OgDataType::ALL.iter().enumerate() {
            assert_eq!(ty.code(), i as i32);
            assert!(ty.is_valid());
        }
        assert!(!OgDataType::Invalid.is_valid());
    }

    #[test]
    fn test_unknown_codes_are_invalid() {
        for code in [NUM_DATA_TYPES, 14, 64, 126, 128, -1, i32::MAX, i32::MIN] {
            assert_eq!(OgDataType::from_i32(code), OgDataType::Invalid, "{code}");
        }
    }

    #[test]
    fn test_trait_mapping_is_bijective() {
        let mapped = [
            (i8::DATA_TYPE, i8::TYPE_NAME, i8::SIZE),
            (u8::DATA_TYPE, u8::TYPE_NAME, u8::SIZE),
            (i16::DATA_TYPE, i16::TYPE_NAME, i16::SIZE),
            (u16::DATA_TYPE, u16::TYPE_NAME, u16::SIZE),
            (i32::DATA_TYPE, i32::TYPE_NAME, i32::SIZE),
            (u32::DATA_TYPE, u32::TYPE_NAME, u32::SIZE),
            (i64::DATA_TYPE, i64::TYPE_NAME, i64::SIZE),
            (u64::DATA_TYPE, u64::TYPE_NAME, u64::SIZE),
            (f16::DATA_TYPE, f16::TYPE_NAME, f16::SIZE),
            (f32::DATA_TYPE, f32::TYPE_NAME, f32::SIZE),
            (f64::DATA_TYPE, f64::TYPE_NAME, f64::SIZE),
            (Vec3h::DATA_TYPE, Vec3h::TYPE_NAME, Vec3h::SIZE),
            (Vec3::DATA_TYPE, Vec3::TYPE_NAME, Vec3::SIZE),
            (DVec3::DATA_TYPE, DVec3::TYPE_NAME, DVec3::SIZE),
        ];

        // One mapped type per live code, in code order.
        assert_eq!(mapped.len(), OgDataType::ALL.len());
        for ((ty, name, size), live) in mapped.iter().zip(OgDataType::ALL) {
            assert_eq!(*ty, live);
            assert_eq!(*name, live.name());
            assert_eq!(*size, live.size());
            assert_eq!(OgDataType::from_name(name), live);
        }
    }

    #[test]
    fn test_code_for_and_name_for() {
        assert_eq!(code_for::<u32>(), OgDataType::Uint32);
        assert_eq!(name_for::<DVec3>(), "vec64_t");
        assert_eq!(OgDataType::from_name("bogus"), OgDataType::Invalid);
        assert_eq!(OgDataType::Float16.to_string(), "float16_t");
    }
}
