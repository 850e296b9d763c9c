//! Ogawa format writer implementation.

mod archive;
mod group;
mod stream;

pub use archive::OArchive;
pub use group::{OData, OGroup};
pub use stream::OStream;
