//! Collaborator interfaces for the established control connection.
//!
//! The crate never opens, authenticates or encodes anything itself;
//! the owning client implements these traits and hands the connection
//! to [`crate::MetaSession`].

use crate::{entry::Entry, error::Error};

/// `FEAT` name gating size queries.
pub const SIZE: &str = "SIZE";
/// `FEAT` name gating modification-time reads.
pub const MDTM: &str = "MDTM";
/// `FEAT` name gating modification-time writes.
pub const MFMT: &str = "MFMT";

/// Structured reply to one control-channel command.
#[derive(Debug, Clone)]
pub struct Reply {
    pub success: bool,
    pub code: u32,
    pub message: String,
}

/// Transfer type as set by the `TYPE` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Ascii,
    Binary,
}

/// Executes commands against the control connection.
///
/// One logical connection, not re-entrant: a command/reply exchange
/// must complete before the next command is issued. The session layer
/// guarantees that ordering.
#[async_trait]
pub trait CommandChannel: Send {
    /// Runs a single command/reply exchange.
    async fn execute(&mut self, command: &str) -> Result<Reply, Error>;

    /// Issues `TYPE`, switching how the server interprets subsequent
    /// commands. Must complete before any retried command goes out.
    async fn set_transfer_type(&mut self, r#type: TransferType) -> Result<(), Error>;

    /// Converts a logical path into the wire-safe form used in command
    /// arguments. Identity unless the connection negotiated an
    /// encoding.
    fn encode_path(&self, path: &str) -> String {
        path.to_owned()
    }
}

/// Lists a remote directory into structured entries.
#[async_trait]
pub trait DirectoryLister: Send {
    /// Entry order follows the server listing; nothing is imposed here.
    async fn list(&mut self, directory: &str) -> Result<Vec<Entry>, Error>;
}

/// Optional features advertised by the server, usually via `FEAT`.
pub trait CapabilitySet {
    fn has_feature(&self, name: &str) -> bool;
}
