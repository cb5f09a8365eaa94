//! `SIZE` query with the sticky ASCII-mode fallback.

use crate::{
    channel::{self, CapabilitySet, CommandChannel, TransferType},
    error::Error,
    utils::validate_path,
};

/// Rejection text some servers send when `SIZE` is issued while the
/// connection is in ASCII mode.
const ASCII_REFUSAL: &str = "not allowed in ascii mode";

fn refused_in_ascii(message: &str) -> bool {
    message.to_ascii_lowercase().contains(ASCII_REFUSAL)
}

fn parse_size(message: &str, default: i64) -> i64 {
    message.trim().parse().unwrap_or(default)
}

/// Size of the remote file in bytes, `default` when the server cannot
/// tell.
///
/// Sends nothing when the `SIZE` feature is absent. When the server
/// refuses the command in ASCII mode, switches the connection to
/// binary and retries exactly once; `binary_required` records the
/// refusal for the rest of the connection, so later queries switch
/// before issuing the command. A missing or unparsable size is never
/// an error.
pub(crate) async fn size_of<C>(
    channel: &mut C,
    binary_required: &mut bool,
    path: &str,
    default: i64,
) -> Result<i64, Error>
where
    C: CommandChannel + CapabilitySet,
{
    let _ = validate_path(path)?;

    if !channel.has_feature(channel::SIZE) {
        return Ok(default);
    }

    if *binary_required {
        channel.set_transfer_type(TransferType::Binary).await?;
    }

    let command = format!("SIZE {}", channel.encode_path(path));
    let reply = channel.execute(&command).await?;
    if reply.success {
        return Ok(parse_size(&reply.message, default));
    }

    if *binary_required || !refused_in_ascii(&reply.message) {
        return Ok(default);
    }

    // Sticky for the connection's lifetime; never cleared.
    *binary_required = true;
    debug!("server refused SIZE in ASCII mode, retrying in binary");

    channel.set_transfer_type(TransferType::Binary).await?;

    let retry = channel.execute(&command).await?;
    if retry.success {
        Ok(parse_size(&retry.message, default))
    } else {
        Ok(default)
    }
}
