//! Self-describing values: a type tag dataset followed by the value.

use half::f16;

use super::data_type::{OgDataType, OgawaType};
use super::io::{read_data, read_data_type, write_data, write_data_type};
use crate::ogawa::{IGroup, OGroup};
use crate::util::{DVec3, Error, Result, Vec3, Vec3h};

/// A value of any supported type, tagged by variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OgValue {
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float16(f16),
    Float32(f32),
    Float64(f64),
    Vec16(Vec3h),
    Vec32(Vec3),
    Vec64(DVec3),
}

macro_rules! og_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for OgValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

og_value_from! {
    i8 => Int8, u8 => Uint8, i16 => Int16, u16 => Uint16,
    i32 => Int32, u32 => Uint32, i64 => Int64, u64 => Uint64,
    f16 => Float16, f32 => Float32, f64 => Float64,
    Vec3h => Vec16, Vec3 => Vec32, DVec3 => Vec64,
}

impl OgValue {
    pub fn data_type(&self) -> OgDataType {
        match self {
            Self::Int8(_) => OgDataType::Int8,
            Self::Uint8(_) => OgDataType::Uint8,
            Self::Int16(_) => OgDataType::Int16,
            Self::Uint16(_) => OgDataType::Uint16,
            Self::Int32(_) => OgDataType::Int32,
            Self::Uint32(_) => OgDataType::Uint32,
            Self::Int64(_) => OgDataType::Int64,
            Self::Uint64(_) => OgDataType::Uint64,
            Self::Float16(_) => OgDataType::Float16,
            Self::Float32(_) => OgDataType::Float32,
            Self::Float64(_) => OgDataType::Float64,
            Self::Vec16(_) => OgDataType::Vec16,
            Self::Vec32(_) => OgDataType::Vec32,
            Self::Vec64(_) => OgDataType::Vec64,
        }
    }

    /// Read dataset `idx` as a value of type `ty`.
    pub fn read_as(group: &IGroup, idx: u64, ty: OgDataType) -> Result<Self> {
        Ok(match ty {
            OgDataType::Int8 => Self::Int8(read_data(group, idx)?),
            OgDataType::Uint8 => Self::Uint8(read_data(group, idx)?),
            OgDataType::Int16 => Self::Int16(read_data(group, idx)?),
            OgDataType::Uint16 => Self::Uint16(read_data(group, idx)?),
            OgDataType::Int32 => Self::Int32(read_data(group, idx)?),
            OgDataType::Uint32 => Self::Uint32(read_data(group, idx)?),
            OgDataType::Int64 => Self::Int64(read_data(group, idx)?),
            OgDataType::Uint64 => Self::Uint64(read_data(group, idx)?),
            OgDataType::Float16 => Self::Float16(read_data(group, idx)?),
            OgDataType::Float32 => Self::Float32(read_data(group, idx)?),
            OgDataType::Float64 => Self::Float64(read_data(group, idx)?),
            OgDataType::Vec16 => Self::Vec16(read_data(group, idx)?),
            OgDataType::Vec32 => Self::Vec32(read_data(group, idx)?),
            OgDataType::Vec64 => Self::Vec64(read_data(group, idx)?),
            OgDataType::Invalid => return Err(Error::InvalidDataType(ty.code())),
        })
    }

    /// Write the tag then the value. Returns the value's index.
    pub fn write(&self, group: &OGroup) -> Result<u64> {
        match *self {
            Self::Int8(v) => write_typed(group, &v),
            Self::Uint8(v) => write_typed(group, &v),
            Self::Int16(v) => write_typed(group, &v),
            Self::Uint16(v) => write_typed(group, &v),
            Self::Int32(v) => write_typed(group, &v),
            Self::Uint32(v) => write_typed(group, &v),
            Self::Int64(v) => write_typed(group, &v),
            Self::Uint64(v) => write_typed(group, &v),
            Self::Float16(v) => write_typed(group, &v),
            Self::Float32(v) => write_typed(group, &v),
            Self::Float64(v) => write_typed(group, &v),
            Self::Vec16(v) => write_typed(group, &v),
            Self::Vec32(v) => write_typed(group, &v),
            Self::Vec64(v) => write_typed(group, &v),
        }
    }
}

/// Append the type tag of `T` and then `value`. Returns the value's index;
/// the tag sits at the index before it.
pub fn write_typed<T: OgawaType>(group: &OGroup, value: &T) -> Result<u64> {
    write_data_type::<T>(group)?;
    write_data(group, value)
}

/// Read a tag at `tag_idx` and the matching value at `value_idx`.
///
/// Fails with [`Error::InvalidDataType`] if the tag is not a live code.
pub fn read_typed(group: &IGroup, tag_idx: u64, value_idx: u64) -> Result<OgValue> {
    let ty = read_data_type(group, tag_idx)?;
    if !ty.is_valid() {
        let code: i32 = read_data(group, tag_idx)?;
        return Err(Error::InvalidDataType(code));
    }
    OgValue::read_as(group, value_idx, ty)
}

/// Read a tagged value, requiring the tag to match `T`.
pub fn read_typed_as<T: OgawaType>(group: &IGroup, tag_idx: u64, value_idx: u64) -> Result<T> {
    let ty = read_data_type(group, tag_idx)?;
    if ty != T::DATA_TYPE {
        return Err(Error::TypeMismatch {
            expected: T::TYPE_NAME.to_string(),
            actual: ty.name().to_string(),
        });
    }
    read_data(group, value_idx)
}
