//! Base state shared by Field3D group readers.

use super::io::get_group_name;
use crate::ogawa::IGroup;
use crate::util::{Error, Result};

/// A reader bound to one Ogawa group, or unbound.
///
/// The group's name is resolved once when binding. The group itself is
/// shared with the archive; dropping the handle only drops this reference.
#[derive(Clone, Default)]
pub struct OgIBase {
    bound: Option<Bound>,
}

#[derive(Clone)]
struct Bound {
    group: IGroup,
    name: String,
}

impl OgIBase {
    /// Handle with no group. `is_valid()` is false.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Bind to `group`, caching its name from dataset 0.
    ///
    /// A group without a readable name is still bound; its name is empty.
    pub fn new(group: IGroup) -> Self {
        let name = get_group_name(&group).unwrap_or_else(|e| {
            tracing::warn!(pos = group.pos(), error = %e, "group has no readable name");
            String::new()
        });
        Self {
            bound: Some(Bound { group, name }),
        }
    }

    /// Whether a group is bound.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.bound.is_some()
    }

    /// Cached group name; empty when unbound.
    pub fn name(&self) -> &str {
        self.bound.as_ref().map_or("", |b| b.name.as_str())
    }

    pub fn group(&self) -> Option<&IGroup> {
        self.bound.as_ref().map(|b| &b.group)
    }

    /// The bound group, or [`Error::UnboundGroup`].
    pub fn require_group(&self) -> Result<&IGroup> {
        self.group().ok_or(Error::UnboundGroup)
    }
}

impl std::fmt::Debug for OgIBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.bound {
            Some(b) => f
                .debug_struct("OgIBase")
                .field("name", &b.name)
                .field("pos", &b.group.pos())
                .finish(),
            None => f.write_str("OgIBase(unbound)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::og::{write_data, write_string};
    use crate::ogawa::{IArchive, OArchive};
    use tempfile::NamedTempFile;

    #[test]
    fn test_unbound_handle() {
        let base = OgIBase::default();
        assert!(!base.is_valid());
        assert_eq!(base.name(), "");
        assert!(base.group().is_none());
        assert!(matches!(base.require_group(), Err(Error::UnboundGroup)));
        assert!(!OgIBase::unbound().is_valid());
    }

    #[test]
    fn test_bound_handles() -> Result<()> {
        let temp = NamedTempFile::new()?;
        {
            let archive = OArchive::create(temp.path())?;
            let root = archive.root();
            let named = root.add_group()?;
            write_string(&named, "density")?;
            write_data(&named, &1.0f32)?;
            let unnamed = root.add_group()?;
            write_data(&unnamed, &2u64)?;
        }

        let reader = IArchive::open(temp.path())?;
        let root = reader.root();

        let named = OgIBase::new(root.group(0, 0)?);
        assert!(named.is_valid());
        assert_eq!(named.name(), "density");
        assert_eq!(named.require_group()?.num_children(), 2);

        let unnamed = OgIBase::new(root.group(1, 0)?);
        assert!(unnamed.is_valid());
        assert_eq!(unnamed.name(), "");
        Ok(())
    }
}
