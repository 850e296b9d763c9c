//! Error types for the Field3D Ogawa layer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for container and typed-value operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid magic bytes at start of file
    #[error("Invalid Ogawa file: expected Ogawa magic bytes")]
    InvalidMagic,

    /// File is truncated or corrupted
    #[error("Unexpected end of file at position {0}")]
    UnexpectedEof(u64),

    /// Invalid data structure in file
    #[error("Invalid file structure: {0}")]
    InvalidStructure(String),

    /// Child is a group where data was expected, or the reverse
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Child index out of bounds
    #[error("Child index {index} out of bounds (count: {count})")]
    ChildOutOfBounds { index: usize, count: usize },

    /// Stored dataset size differs from the size of the requested type
    #[error("Size mismatch: expected {expected} bytes, dataset holds {actual}")]
    SizeMismatch { expected: usize, actual: u64 },

    /// Dataset could not be decoded as a length-prefixed string
    #[error("Invalid string dataset: {0}")]
    InvalidString(String),

    /// Type tag outside the live type-code range
    #[error("Unrecognized data type code: {0}")]
    InvalidDataType(i32),

    /// Operation needs a group but the handle is unbound
    #[error("Group handle is not bound to a group")]
    UnboundGroup,

    /// Archive is frozen (finalized)
    #[error("Archive is frozen and cannot be modified")]
    Frozen,

    /// Memory mapping failed
    #[error("Memory mapping failed: {0}")]
    MmapFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }

    /// Create an invalid string error.
    pub fn invalid_string(msg: impl Into<String>) -> Self {
        Self::InvalidString(msg.into())
    }
}

/// Result type alias for Field3D Ogawa operations.
pub type Result<T> = std::result::Result<T, Error>;
