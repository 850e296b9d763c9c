//! Append-only output groups.
//!
//! Datasets are written to the stream as soon as they are added. A group's
//! child table can only be written once every child group has a final
//! position, so tables are emitted bottom-up when the group is frozen.

use std::sync::Arc;

use parking_lot::Mutex;

use super::stream::OStream;
use crate::ogawa::format::*;
use crate::util::{Error, Result};

/// Stream shared by every group of one archive.
pub(crate) struct Sink {
    pub(crate) stream: OStream,
    pub(crate) frozen: bool,
}

pub(crate) type SharedSink = Arc<Mutex<Sink>>;

enum OChild {
    /// Child offset with the data flag already applied.
    Data(u64),
    Group(OGroup),
}

struct GroupState {
    children: Vec<OChild>,
    /// Position of the written child table, set once frozen.
    frozen_pos: Option<u64>,
}

/// A dataset that has been appended to a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OData {
    index: u64,
    pos: u64,
    size: u64,
}

impl OData {
    /// Child index within the owning group.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// File position of the size prefix (0 for empty data).
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Output group handle. Clones refer to the same group.
#[derive(Clone)]
pub struct OGroup {
    sink: SharedSink,
    state: Arc<Mutex<GroupState>>,
}

impl OGroup {
    pub(crate) fn new(sink: SharedSink) -> Self {
        Self {
            sink,
            state: Arc::new(Mutex::new(GroupState {
                children: Vec::new(),
                frozen_pos: None,
            })),
        }
    }

    /// Number of children added so far.
    pub fn num_children(&self) -> u64 {
        self.state.lock().children.len() as u64
    }

    pub fn is_frozen(&self) -> bool {
        self.state.lock().frozen_pos.is_some()
    }

    /// Append `data` as the next child dataset.
    pub fn add_data(&self, data: &[u8]) -> Result<OData> {
        let mut state = self.state.lock();
        if state.frozen_pos.is_some() {
            return Err(Error::Frozen);
        }

        let (offset, pos) = if data.is_empty() {
            (EMPTY_DATA, 0)
        } else {
            let mut sink = self.sink.lock();
            if sink.frozen {
                return Err(Error::Frozen);
            }
            let pos = sink.stream.pos();
            sink.stream.write_u64(data.len() as u64)?;
            sink.stream.write_bytes(data)?;
            (make_data_offset(pos), pos)
        };

        let index = state.children.len() as u64;
        state.children.push(OChild::Data(offset));
        Ok(OData {
            index,
            pos,
            size: data.len() as u64,
        })
    }

    /// Append a new empty child group.
    pub fn add_group(&self) -> Result<OGroup> {
        let mut state = self.state.lock();
        if state.frozen_pos.is_some() || self.sink.lock().frozen {
            return Err(Error::Frozen);
        }
        let child = OGroup::new(self.sink.clone());
        state.children.push(OChild::Group(child.clone()));
        Ok(child)
    }

    /// Write this group's child table, freezing child groups first.
    ///
    /// Returns the table position (0 for a group with no children).
    /// Calling it again returns the same position without writing.
    pub fn freeze(&self) -> Result<u64> {
        let mut state = self.state.lock();
        if let Some(pos) = state.frozen_pos {
            return Ok(pos);
        }

        let mut offsets = Vec::with_capacity(state.children.len());
        for child in &state.children {
            match child {
                OChild::Data(offset) => offsets.push(*offset),
                OChild::Group(group) => offsets.push(make_group_offset(group.freeze()?)),
            }
        }

        let pos = if offsets.is_empty() {
            EMPTY_GROUP
        } else {
            let mut sink = self.sink.lock();
            if sink.frozen {
                return Err(Error::Frozen);
            }
            let pos = sink.stream.pos();
            sink.stream.write_u64(offsets.len() as u64)?;
            for offset in &offsets {
                sink.stream.write_u64(*offset)?;
            }
            pos
        };

        tracing::trace!(pos, children = offsets.len(), "froze ogawa group");
        state.frozen_pos = Some(pos);
        Ok(pos)
    }
}
