//! Serialized metadata session over one control connection.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::Mutex;

use crate::{
    channel::{CapabilitySet, CommandChannel, DirectoryLister},
    entry::Entry,
    error::Error,
    resolve::{self, Resolution},
    size, time,
};

/// Session-wide tuning for metadata queries.
#[derive(Debug, Clone)]
pub struct MetaConfig {
    /// Upper bound on link hops for [`MetaSession::dereference_link`].
    pub max_link_depth: usize,
    /// Zone the server reports `MDTM` timestamps in. `None` leaves
    /// timestamps untouched.
    pub server_timezone: Option<FixedOffset>,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            max_link_depth: 20,
            server_timezone: None,
        }
    }
}

struct Inner<C> {
    link: C,
    /// Set once the server refuses `SIZE` in ASCII mode; never cleared
    /// for the connection's lifetime. Only written under the session
    /// lock, so it needs no lock of its own.
    binary_required: bool,
}

/// Remote-file metadata operations over one shared control connection.
///
/// Every operation holds the connection lock for its full command/reply
/// exchange (including the listings and enrichment queries of a link
/// resolution), so concurrent callers serialize in lock-acquisition
/// order and never interleave bytes on the wire. Cloning is cheap and
/// shares the connection.
///
/// Cancelling an operation mid-await can leave the in-flight command's
/// reply undrained on the connection; draining or reconnecting is then
/// the caller's concern.
pub struct MetaSession<C> {
    inner: Arc<Mutex<Inner<C>>>,
    config: MetaConfig,
}

impl<C> Clone for MetaSession<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C> MetaSession<C>
where
    C: CommandChannel + DirectoryLister + CapabilitySet,
{
    pub fn new(link: C) -> Self {
        Self::with_config(link, MetaConfig::default())
    }

    pub fn with_config(link: C, config: MetaConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                link,
                binary_required: false,
            })),
            config,
        }
    }

    /// Size of the remote file in bytes, `default` when the server
    /// cannot tell. No command is sent when the `SIZE` feature is
    /// absent.
    pub async fn size(&self, path: &str, default: i64) -> Result<i64, Error> {
        let mut inner = self.inner.lock().await;
        let inner = &mut *inner;
        size::size_of(&mut inner.link, &mut inner.binary_required, path, default).await
    }

    /// Modification time via `MDTM`, `None` when the server has no
    /// answer for the path.
    pub async fn modified_time(&self, path: &str) -> Result<Option<DateTime<Utc>>, Error> {
        let mut inner = self.inner.lock().await;
        time::modified_time(&mut inner.link, path, self.config.server_timezone).await
    }

    /// Sets the modification time via `MFMT`. A server rejection comes
    /// back as [`Error::Rejected`].
    pub async fn set_modified_time(&self, path: &str, time: DateTime<Utc>) -> Result<(), Error> {
        let mut inner = self.inner.lock().await;
        time::set_modified_time(&mut inner.link, path, time, self.config.server_timezone).await
    }

    /// Follows a chain of symbolic links to its terminal entry, bounded
    /// by the session's configured hop budget.
    pub async fn dereference_link(&self, entry: &Entry) -> Result<Resolution, Error> {
        self.dereference_link_with_depth(entry, self.config.max_link_depth)
            .await
    }

    /// [`Self::dereference_link`] with an explicit hop budget.
    pub async fn dereference_link_with_depth(
        &self,
        entry: &Entry,
        max_depth: usize,
    ) -> Result<Resolution, Error> {
        let mut inner = self.inner.lock().await;
        let inner = &mut *inner;
        resolve::dereference(
            &mut inner.link,
            &mut inner.binary_required,
            entry,
            max_depth,
            self.config.server_timezone,
        )
        .await
    }
}
