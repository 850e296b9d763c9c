//! Ogawa archive writer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::group::{OGroup, Sink};
use super::stream::OStream;
use crate::ogawa::format::*;
use crate::util::Result;

/// Ogawa archive writer.
///
/// The header is written on creation with the frozen flag cleared. Closing
/// (or dropping) the archive freezes every group, records the root position
/// and sets the frozen flag.
pub struct OArchive {
    path: PathBuf,
    sink: Arc<Mutex<Sink>>,
    root: OGroup,
}

impl OArchive {
    /// Create a new archive at `path`, truncating any existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut stream = OStream::create(&path)?;

        stream.write_bytes(OGAWA_MAGIC)?;
        stream.write_u8(NOT_FROZEN_FLAG)?;
        stream.write_bytes(&CURRENT_VERSION.to_be_bytes())?;
        stream.write_u64(0)?; // Root position placeholder.

        let sink = Arc::new(Mutex::new(Sink {
            stream,
            frozen: false,
        }));
        let root = OGroup::new(sink.clone());

        tracing::debug!(path = %path.display(), "created ogawa archive");
        Ok(Self { path, sink, root })
    }

    /// Path the archive is written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle to the root group.
    pub fn root(&self) -> OGroup {
        self.root.clone()
    }

    pub fn is_frozen(&self) -> bool {
        self.sink.lock().frozen
    }

    /// Finalize the archive, reporting any write failure.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        if self.sink.lock().frozen {
            return Ok(());
        }

        let root_pos = self.root.freeze()?;

        let mut sink = self.sink.lock();
        sink.stream.seek(ROOT_POS_OFFSET as u64)?;
        sink.stream.write_u64(root_pos)?;
        sink.stream.seek(FROZEN_OFFSET as u64)?;
        sink.stream.write_u8(FROZEN_FLAG)?;
        sink.stream.seek_end()?;
        sink.stream.flush()?;
        sink.frozen = true;

        tracing::debug!(path = %self.path.display(), root_pos, "closed ogawa archive");
        Ok(())
    }
}

impl Drop for OArchive {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to close ogawa archive");
        }
    }
}
