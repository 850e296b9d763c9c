//! Typed read/write primitives on top of Ogawa datasets.
//!
//! Values are stored as their raw in-memory bytes, one value per dataset,
//! with no endian conversion. Files are therefore only portable between
//! platforms sharing the writer's byte order. Reads check the dataset size
//! against the requested type and never hand back partially filled values.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use bytemuck::{Pod, Zeroable};

use super::data_type::{OgDataType, OgawaType};
use super::group_type::OgGroupType;
use super::OGAWA_THREAD;
use crate::ogawa::{IGroup, OGroup};
use crate::util::{Error, Result};

/// Bytes used by the string length prefix.
pub const STRING_LENGTH_SIZE: usize = 8;

/// Read the value stored at dataset `idx`.
///
/// Fails with [`Error::SizeMismatch`] if the dataset is not exactly
/// `size_of::<T>()` bytes. A same-sized value of another type is not
/// detected here; check the type tag with [`read_data_type`] first.
pub fn read_data<T: Pod>(group: &IGroup, idx: u64) -> Result<T> {
    let data = group.data(idx, OGAWA_THREAD)?;
    let expected = std::mem::size_of::<T>();
    if data.size() != expected as u64 {
        return Err(Error::SizeMismatch {
            expected,
            actual: data.size(),
        });
    }

    let mut value = T::zeroed();
    data.read(bytemuck::bytes_of_mut(&mut value), 0, OGAWA_THREAD)?;
    Ok(value)
}

/// Like [`read_data`], but stores into `value`. On failure `value` is left
/// exactly as it was.
pub fn read_data_into<T: Pod>(group: &IGroup, idx: u64, value: &mut T) -> Result<()> {
    *value = read_data(group, idx)?;
    Ok(())
}

/// Append `value` as a new dataset and return its index.
pub fn write_data<T: Pod>(group: &OGroup, value: &T) -> Result<u64> {
    Ok(group.add_data(bytemuck::bytes_of(value))?.index())
}

/// Append the type tag of `T` as a new dataset and return its index.
pub fn write_data_type<T: OgawaType>(group: &OGroup) -> Result<u64> {
    write_data(group, &T::DATA_TYPE.code())
}

/// Read a type tag written by [`write_data_type`].
///
/// A tag of the right size but with an unknown code yields
/// [`OgDataType::Invalid`]; callers must not interpret the matching value.
pub fn read_data_type(group: &IGroup, idx: u64) -> Result<OgDataType> {
    let code: i32 = read_data(group, idx)?;
    let ty = OgDataType::from_i32(code);
    if !ty.is_valid() {
        tracing::warn!(idx, code, "unrecognized data type code");
    }
    Ok(ty)
}

/// Append a string dataset: u64 LE byte length followed by UTF-8 bytes.
pub fn write_string(group: &OGroup, s: &str) -> Result<u64> {
    let mut buf = Vec::with_capacity(STRING_LENGTH_SIZE + s.len());
    buf.write_u64::<LittleEndian>(s.len() as u64)?;
    buf.extend_from_slice(s.as_bytes());
    Ok(group.add_data(&buf)?.index())
}

/// Read a string dataset written by [`write_string`].
pub fn read_string(group: &IGroup, idx: u64) -> Result<String> {
    let data = group.data(idx, OGAWA_THREAD)?;
    if data.size() < STRING_LENGTH_SIZE as u64 {
        return Err(Error::invalid_string(format!(
            "dataset {} holds {} bytes, too short for a length prefix",
            idx,
            data.size()
        )));
    }

    let mut prefix = [0u8; STRING_LENGTH_SIZE];
    data.read(&mut prefix, 0, OGAWA_THREAD)?;
    let declared = LittleEndian::read_u64(&prefix);
    let available = data.size() - STRING_LENGTH_SIZE as u64;
    if declared != available {
        return Err(Error::invalid_string(format!(
            "dataset {} declares {} bytes but holds {}",
            idx, declared, available
        )));
    }

    let mut bytes = vec![0u8; available as usize];
    data.read(&mut bytes, STRING_LENGTH_SIZE as u64, OGAWA_THREAD)?;
    String::from_utf8(bytes)
        .map_err(|e| Error::invalid_string(format!("dataset {}: {}", idx, e)))
}

/// Name of a group, stored as the string at dataset 0.
pub fn get_group_name(group: &IGroup) -> Result<String> {
    read_string(group, 0)
}

/// Append a group kind code as a new dataset and return its index.
pub fn write_group_type(group: &OGroup, kind: OgGroupType) -> Result<u64> {
    write_data(group, &kind.code())
}

/// Read a group kind code. Unknown codes yield `None`.
pub fn read_group_type(group: &IGroup, idx: u64) -> Result<Option<OgGroupType>> {
    let code: i32 = read_data(group, idx)?;
    Ok(OgGroupType::from_i32(code))
}
