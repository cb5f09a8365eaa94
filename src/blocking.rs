//! Blocking facade over [`MetaSession`].
//!
//! Each method drives the corresponding async operation to completion
//! on the calling thread. The facade shares the session's connection
//! lock, so a blocking caller and an async caller issued concurrently
//! never interleave command/reply exchanges on the wire.

use chrono::{DateTime, Utc};
use tokio::runtime;

use crate::{
    channel::{CapabilitySet, CommandChannel, DirectoryLister},
    entry::Entry,
    error::Error,
    resolve::Resolution,
    session::MetaSession,
};

pub struct BlockingMetaSession<C> {
    session: MetaSession<C>,
    rt: runtime::Runtime,
}

impl<C> BlockingMetaSession<C>
where
    C: CommandChannel + DirectoryLister + CapabilitySet,
{
    /// Wraps a session, keeping it shared with any async callers
    /// holding clones of it.
    pub fn new(session: MetaSession<C>) -> Result<Self, Error> {
        let rt = runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        Ok(Self { session, rt })
    }

    /// See [`MetaSession::size`].
    pub fn size(&self, path: &str, default: i64) -> Result<i64, Error> {
        self.rt.block_on(self.session.size(path, default))
    }

    /// See [`MetaSession::modified_time`].
    pub fn modified_time(&self, path: &str) -> Result<Option<DateTime<Utc>>, Error> {
        self.rt.block_on(self.session.modified_time(path))
    }

    /// See [`MetaSession::set_modified_time`].
    pub fn set_modified_time(&self, path: &str, time: DateTime<Utc>) -> Result<(), Error> {
        self.rt.block_on(self.session.set_modified_time(path, time))
    }

    /// See [`MetaSession::dereference_link`].
    pub fn dereference_link(&self, entry: &Entry) -> Result<Resolution, Error> {
        self.rt.block_on(self.session.dereference_link(entry))
    }

    /// See [`MetaSession::dereference_link_with_depth`].
    pub fn dereference_link_with_depth(
        &self,
        entry: &Entry,
        max_depth: usize,
    ) -> Result<Resolution, Error> {
        self.rt
            .block_on(self.session.dereference_link_with_depth(entry, max_depth))
    }

    /// The shared async session.
    pub fn as_async(&self) -> &MetaSession<C> {
        &self.session
    }
}
