//! Remote-file metadata over a single FTP control connection: symbolic
//! link dereferencing, `SIZE` lookup with ASCII-mode fallback and
//! `MDTM`/`MFMT` modification times.
//!
//! Establishing and authenticating the connection, parsing directory
//! listings and transferring data stay with the caller; they plug in
//! through the traits in [`channel`]. All operations funnel through one
//! [`session::MetaSession`], which serializes command/reply exchanges
//! on the shared connection. A blocking facade lives in [`blocking`].

#[macro_use]
extern crate log;
#[macro_use]
extern crate async_trait;

pub mod blocking;
pub mod channel;
pub mod entry;
mod error;
mod resolve;
mod session;
mod size;
mod time;
mod utils;

#[cfg(test)]
pub(crate) mod mock;

pub use entry::{Entry, EntryKind, UNKNOWN_SIZE};
pub use error::Error;
pub use resolve::Resolution;
pub use session::{MetaConfig, MetaSession};
