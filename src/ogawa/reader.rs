//! Ogawa format reader implementation.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;
use parking_lot::Mutex;

use super::format::*;
use crate::util::{Error, Result};

/// Options controlling how an archive is opened for reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Memory-map the file instead of reading through file handles.
    pub use_mmap: bool,
    /// Number of independent file handles in buffered mode. Reads on
    /// thread channel `t` use handle `t % num_streams`.
    pub num_streams: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            use_mmap: cfg!(feature = "mmap"),
            num_streams: 1,
        }
    }
}

impl ReadOptions {
    /// Buffered reads with the given number of file handles.
    pub fn buffered(num_streams: usize) -> Self {
        Self {
            use_mmap: false,
            num_streams: num_streams.max(1),
        }
    }
}

/// Input streams for reading Ogawa data.
pub struct IStreams {
    inner: StreamsInner,
    version: u16,
    frozen: bool,
    size: u64,
}

enum StreamsInner {
    Mmap(Mmap),
    /// One handle per read channel.
    Files(Vec<Mutex<File>>),
}

impl IStreams {
    /// Open a file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, ReadOptions::default())
    }

    pub fn open_opts(path: impl AsRef<Path>, opts: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let open = || {
            File::open(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::FileNotFound(path.to_path_buf())
                } else {
                    Error::Io(e)
                }
            })
        };

        let file = open()?;
        let size = file.metadata()?.len();
        if size < HEADER_SIZE as u64 {
            return Err(Error::UnexpectedEof(size));
        }

        let inner = if opts.use_mmap {
            // Safety: the mapping is read-only and the file is not written
            // through this process while mapped.
            let mmap = unsafe { Mmap::map(&file) }
                .map_err(|e| Error::MmapFailed(e.to_string()))?;
            StreamsInner::Mmap(mmap)
        } else {
            let mut files = Vec::with_capacity(opts.num_streams.max(1));
            files.push(Mutex::new(file));
            for _ in 1..opts.num_streams {
                files.push(Mutex::new(open()?));
            }
            StreamsInner::Files(files)
        };

        let mut streams = Self {
            inner,
            version: 0,
            frozen: false,
            size,
        };
        let mut header = [0u8; HEADER_SIZE];
        streams.read_into(0, &mut header, 0)?;
        let (version, frozen) = Self::parse_header(&header)?;
        streams.version = version;
        streams.frozen = frozen;

        tracing::debug!(
            path = %path.display(),
            size,
            version,
            frozen,
            mmap = opts.use_mmap,
            "opened ogawa streams"
        );
        Ok(streams)
    }

    /// Validate the header, returning `(version, frozen)`.
    fn parse_header(data: &[u8]) -> Result<(u16, bool)> {
        if data.len() < HEADER_SIZE {
            return Err(Error::UnexpectedEof(data.len() as u64));
        }
        if &data[0..5] != OGAWA_MAGIC {
            return Err(Error::InvalidMagic);
        }
        let frozen = data[FROZEN_OFFSET] == FROZEN_FLAG;
        let version = u16::from_be_bytes([data[VERSION_OFFSET], data[VERSION_OFFSET + 1]]);
        Ok((version, frozen))
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Total file size in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of independent read channels.
    pub fn num_streams(&self) -> usize {
        match &self.inner {
            StreamsInner::Mmap(_) => 1,
            StreamsInner::Files(files) => files.len(),
        }
    }

    pub fn root_pos(&self) -> Result<u64> {
        self.read_u64(ROOT_POS_OFFSET as u64, 0)
    }

    /// Fill `buf` from file position `pos` using read channel `thread`.
    pub fn read_into(&self, pos: u64, buf: &mut [u8], thread: usize) -> Result<()> {
        let end = pos
            .checked_add(buf.len() as u64)
            .ok_or(Error::UnexpectedEof(u64::MAX))?;
        if end > self.size {
            return Err(Error::UnexpectedEof(end));
        }

        match &self.inner {
            StreamsInner::Mmap(mmap) => {
                buf.copy_from_slice(&mmap[pos as usize..end as usize]);
            }
            StreamsInner::Files(files) => {
                let mut f = files[thread % files.len()].lock();
                f.seek(SeekFrom::Start(pos))?;
                f.read_exact(buf)?;
            }
        }
        Ok(())
    }

    pub fn read_u64(&self, pos: u64, thread: usize) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_into(pos, &mut buf, thread)?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Ogawa archive reader.
pub struct IArchive {
    streams: Arc<IStreams>,
    root: IGroup,
}

impl IArchive {
    /// Open an archive with default [`ReadOptions`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, ReadOptions::default())
    }

    pub fn open_opts(path: impl AsRef<Path>, opts: ReadOptions) -> Result<Self> {
        let streams = Arc::new(IStreams::open_opts(path, opts)?);
        let root_pos = streams.root_pos()?;
        let root = IGroup::new(streams.clone(), root_pos, 0)?;
        Ok(Self { streams, root })
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.streams.is_frozen()
    }

    #[inline]
    pub fn version(&self) -> u16 {
        self.streams.version()
    }

    #[inline]
    pub fn root(&self) -> &IGroup {
        &self.root
    }

    #[inline]
    pub fn streams(&self) -> &Arc<IStreams> {
        &self.streams
    }
}

/// A group in the Ogawa hierarchy.
///
/// Cloning is cheap: clones share the underlying streams and cached offsets.
#[derive(Clone)]
pub struct IGroup {
    streams: Arc<IStreams>,
    pos: u64,
    child_offsets: Arc<[u64]>,
}

impl IGroup {
    /// Load the group at `pos`. Position 0 is the empty group.
    pub fn new(streams: Arc<IStreams>, pos: u64, thread: usize) -> Result<Self> {
        let num_children = if pos == 0 {
            0
        } else {
            streams.read_u64(pos, thread)?
        };

        // Each child offset needs 8 bytes after the count.
        let table_end = num_children
            .checked_mul(8)
            .and_then(|n| n.checked_add(pos + 8))
            .ok_or_else(|| Error::invalid("Group child count overflows"))?;
        if num_children > 0 && table_end > streams.size() {
            return Err(Error::invalid(format!(
                "Group at {} claims {} children past end of file",
                pos, num_children
            )));
        }

        let mut offsets = Vec::with_capacity(num_children as usize);
        for i in 0..num_children {
            offsets.push(streams.read_u64(pos + 8 + i * 8, thread)?);
        }

        Ok(Self {
            streams,
            pos,
            child_offsets: offsets.into(),
        })
    }

    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn num_children(&self) -> u64 {
        self.child_offsets.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.child_offsets.is_empty()
    }

    /// Raw child offset, including the data flag.
    pub fn child_offset(&self, index: u64) -> Result<u64> {
        self.child_offsets
            .get(index as usize)
            .copied()
            .ok_or(Error::ChildOutOfBounds {
                index: index as usize,
                count: self.child_offsets.len(),
            })
    }

    pub fn is_child_group(&self, index: u64) -> Result<bool> {
        Ok(is_group_offset(self.child_offset(index)?))
    }

    pub fn is_child_data(&self, index: u64) -> Result<bool> {
        Ok(is_data_offset(self.child_offset(index)?))
    }

    /// Open the child group at `index`.
    pub fn group(&self, index: u64, thread: usize) -> Result<IGroup> {
        let offset = self.child_offset(index)?;
        if !is_group_offset(offset) {
            return Err(Error::TypeMismatch {
                expected: "group".to_string(),
                actual: "data".to_string(),
            });
        }
        IGroup::new(self.streams.clone(), extract_offset(offset), thread)
    }

    /// Open the dataset at `index`.
    pub fn data(&self, index: u64, thread: usize) -> Result<IData> {
        let offset = self.child_offset(index)?;
        if !is_data_offset(offset) {
            return Err(Error::TypeMismatch {
                expected: "data".to_string(),
                actual: "group".to_string(),
            });
        }
        IData::new(self.streams.clone(), extract_offset(offset), thread)
    }
}

/// Data block in the Ogawa hierarchy.
pub struct IData {
    streams: Arc<IStreams>,
    pos: u64,
    size: u64,
}

impl IData {
    /// Load the data header at `pos`. Position 0 is the empty dataset.
    pub fn new(streams: Arc<IStreams>, pos: u64, thread: usize) -> Result<Self> {
        let size = if pos == 0 {
            0
        } else {
            streams.read_u64(pos, thread)?
        };
        if pos != 0 && pos.saturating_add(8).saturating_add(size) > streams.size() {
            return Err(Error::UnexpectedEof(pos.saturating_add(8).saturating_add(size)));
        }
        Ok(Self { streams, pos, size })
    }

    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Payload size in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Read `dest.len()` payload bytes starting at `offset`.
    pub fn read(&self, dest: &mut [u8], offset: u64, thread: usize) -> Result<()> {
        if offset.saturating_add(dest.len() as u64) > self.size {
            return Err(Error::other(format!(
                "Read of {} bytes at offset {} exceeds data size {}",
                dest.len(),
                offset,
                self.size
            )));
        }
        if dest.is_empty() {
            return Ok(());
        }
        self.streams.read_into(self.pos + 8 + offset, dest, thread)
    }

    /// Read the whole payload.
    pub fn read_all(&self, thread: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.size as usize];
        self.read(&mut buf, 0, thread)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_parsing() {
        let mut header = [0u8; 16];
        header[0..5].copy_from_slice(OGAWA_MAGIC);
        header[FROZEN_OFFSET] = FROZEN_FLAG;
        header[VERSION_OFFSET] = 0;
        header[VERSION_OFFSET + 1] = 1;

        let (version, frozen) = IStreams::parse_header(&header).unwrap();
        assert_eq!(version, 1);
        assert!(frozen);
    }

    #[test]
    fn test_invalid_magic() {
        let header = [0u8; 16];
        let result = IStreams::parse_header(&header);
        assert!(matches!(result, Err(Error::InvalidMagic)));
    }

    #[test]
    fn test_short_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), b"Ogawa").unwrap();
        let result = IStreams::open(temp.path());
        assert!(matches!(result, Err(Error::UnexpectedEof(5))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = IArchive::open(dir.path().join("missing.ogawa"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
