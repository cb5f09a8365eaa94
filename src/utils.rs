use crate::error::Error;

/// Rejects paths with no readable characters before they reach the
/// wire.
pub fn validate_path(path: &str) -> Result<&str, Error> {
    if path.trim().is_empty() {
        return Err(Error::InvalidArgument("blank path".to_owned()));
    }

    Ok(path)
}
