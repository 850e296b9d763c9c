//! Ogawa layout constants and child-offset helpers.

/// Magic bytes at the start of an Ogawa file.
pub const OGAWA_MAGIC: &[u8; 5] = b"Ogawa";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Header offset of the frozen flag.
pub const FROZEN_OFFSET: usize = 5;

/// Header offset of the two version bytes.
pub const VERSION_OFFSET: usize = 6;

/// Header offset of the root group position.
pub const ROOT_POS_OFFSET: usize = 8;

/// Format version written into new archives (stored as bytes `{0, 1}`).
pub const CURRENT_VERSION: u16 = 1;

/// Frozen flag once the archive has been closed.
pub const FROZEN_FLAG: u8 = 0xFF;

/// Frozen flag while the archive is still being written.
pub const NOT_FROZEN_FLAG: u8 = 0x00;

/// Child offsets with the top bit set point at data, otherwise at a group.
pub const DATA_FLAG: u64 = 1 << 63;

/// Position bits of a child offset.
pub const OFFSET_MASK: u64 = !DATA_FLAG;

/// Offset recorded for a group with no children.
pub const EMPTY_GROUP: u64 = 0;

/// Offset recorded for a zero-length dataset.
pub const EMPTY_DATA: u64 = DATA_FLAG;

#[inline]
pub const fn is_group_offset(offset: u64) -> bool {
    offset & DATA_FLAG == 0
}

#[inline]
pub const fn is_data_offset(offset: u64) -> bool {
    offset & DATA_FLAG != 0
}

/// Strip the data flag, leaving the file position.
#[inline]
pub const fn extract_offset(offset: u64) -> u64 {
    offset & OFFSET_MASK
}

#[inline]
pub const fn make_group_offset(pos: u64) -> u64 {
    pos & OFFSET_MASK
}

#[inline]
pub const fn make_data_offset(pos: u64) -> u64 {
    pos | DATA_FLAG
}

/// True for both the empty-group and empty-data markers.
#[inline]
pub const fn is_empty_offset(offset: u64) -> bool {
    extract_offset(offset) == 0
}
