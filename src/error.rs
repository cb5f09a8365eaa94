use std::io;
use thiserror::Error;

use crate::channel::Reply;

/// Enum for client errors.
///
/// Protocol-level "not available" outcomes (missing file, unsupported
/// query, exhausted link budget) are not errors; operations report
/// those through sentinels, `None` or [`crate::Resolution`] variants.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The argument would never reach the wire: blank path,
    /// dereferencing a non-link entry, a link without a target.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Any errors related to I/O on the control connection
    #[error("I/O: {0}")]
    IO(String),
    /// A command the server was expected to accept was rejected.
    /// Currently only raised for `MFMT`.
    #[error("command rejected ({}): {}", .0.code, .0.message)]
    Rejected(Reply),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::IO(error.to_string())
    }
}
