//! Directory-listing entry model shared with the lister collaborator.

use chrono::{DateTime, Utc};

/// Size value meaning "unknown or unavailable".
pub const UNKNOWN_SIZE: i64 = -1;

/// Kind of a remote entry as reported by the directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Link,
}

/// A single entry of a remote directory listing.
///
/// Produced by the [`crate::channel::DirectoryLister`] collaborator and
/// enriched in place during link resolution; never cached by this
/// crate.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full remote path of the entry.
    pub path: String,
    pub kind: EntryKind,
    /// Target path for `Link` entries. The listing producer must fill
    /// this before the entry can be dereferenced.
    pub link_target: Option<String>,
    /// Size in bytes, [`UNKNOWN_SIZE`] when the listing did not carry
    /// one.
    pub size: i64,
    /// Modification time, when known.
    pub modified: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn file<P: Into<String>>(path: P, size: i64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            link_target: None,
            size,
            modified: None,
        }
    }

    pub fn directory<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            link_target: None,
            size: UNKNOWN_SIZE,
            modified: None,
        }
    }

    pub fn link<P, T>(path: P, target: T) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            path: path.into(),
            kind: EntryKind::Link,
            link_target: Some(target.into()),
            size: UNKNOWN_SIZE,
            modified: None,
        }
    }

    /// Returns `true` if the entry is a symbolic link.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.kind == EntryKind::Link
    }
}
