//! Symbolic-link dereferencing over the control connection.

use chrono::FixedOffset;

use crate::{
    channel::{self, CapabilitySet, CommandChannel, DirectoryLister},
    entry::{Entry, EntryKind, UNKNOWN_SIZE},
    error::Error,
    size, time,
};

/// Outcome of following a link chain.
#[derive(Debug)]
pub enum Resolution {
    /// The terminal non-link entry, enriched with size and modification
    /// time where the server supports the queries.
    Resolved(Entry),
    /// Some link in the chain points at a path absent from its
    /// directory listing.
    NotFound,
    /// The hop budget ran out before a terminal entry was reached.
    /// Covers link cycles.
    DepthExceeded,
}

impl Resolution {
    /// The resolved entry, if the chain reached one.
    #[must_use]
    pub fn entry(self) -> Option<Entry> {
        match self {
            Self::Resolved(entry) => Some(entry),
            Self::NotFound | Self::DepthExceeded => None,
        }
    }
}

/// Directory component of a remote path. A bare filename lists the
/// current remote directory.
fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Target of a link entry, validated. Every entry followed mid-chain
/// passes through here too, so a producer that left a target unset
/// fails loudly instead of resolving to garbage.
fn link_target(entry: &Entry) -> Result<&str, Error> {
    if entry.kind != EntryKind::Link {
        return Err(Error::InvalidArgument(format!(
            "{} is not a symbolic link",
            entry.path
        )));
    }

    entry
        .link_target
        .as_deref()
        .ok_or_else(|| Error::InvalidArgument(format!("link {} has no target", entry.path)))
}

async fn enrich<C>(
    link: &mut C,
    binary_required: &mut bool,
    entry: &mut Entry,
    zone: Option<FixedOffset>,
) -> Result<(), Error>
where
    C: CommandChannel + CapabilitySet,
{
    if entry.modified.is_none() && link.has_feature(channel::MDTM) {
        entry.modified = time::modified_time(link, &entry.path, zone).await?;
    }

    if entry.kind == EntryKind::File
        && entry.size == UNKNOWN_SIZE
        && link.has_feature(channel::SIZE)
    {
        entry.size = size::size_of(link, binary_required, &entry.path, UNKNOWN_SIZE).await?;
    }

    Ok(())
}

/// Follows a chain of symbolic links to its terminal entry.
///
/// Each hop lists the target's parent directory and scans for an entry
/// whose path equals the target exactly, no normalization; when several
/// entries share that path, the first in listing order wins. The hop
/// counter is bounded by `max_depth` regardless of the actual link
/// topology, so cycles come back as [`Resolution::DepthExceeded`], a
/// normal outcome rather than an error.
pub(crate) async fn dereference<C>(
    link: &mut C,
    binary_required: &mut bool,
    entry: &Entry,
    max_depth: usize,
    zone: Option<FixedOffset>,
) -> Result<Resolution, Error>
where
    C: CommandChannel + DirectoryLister + CapabilitySet,
{
    let mut target = link_target(entry)?.to_owned();
    let mut hops = 0;

    loop {
        let listing = link.list(parent_of(&target)).await?;

        let Some(found) = listing.into_iter().find(|e| e.path == target) else {
            return Ok(Resolution::NotFound);
        };

        if found.kind != EntryKind::Link {
            let mut terminal = found;
            enrich(link, binary_required, &mut terminal, zone).await?;
            return Ok(Resolution::Resolved(terminal));
        }

        hops += 1;
        if hops >= max_depth {
            debug!("link chain from {} exceeded {} hops", entry.path, max_depth);
            return Ok(Resolution::DepthExceeded);
        }

        target = link_target(&found)?.to_owned();
    }
}
