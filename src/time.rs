//! `MDTM`/`MFMT` queries and the server timestamp format.
//!
//! The wire format is the RFC 3659 `YYYYMMDDHHMMSS` form, optionally
//! followed by a sub-second fraction. Servers report it in their local
//! zone; the session's configured offset converts it to UTC on read
//! and back on write, identity when unconfigured.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::{
    channel::CommandChannel,
    error::Error,
    utils::validate_path,
};

const WIRE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parses a server timestamp into UTC. The fraction is dropped; the
/// protocol carries nothing finer than seconds on the set side.
pub(crate) fn parse_wire_timestamp(
    text: &str,
    zone: Option<FixedOffset>,
) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    let (whole, _fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let naive = NaiveDateTime::parse_from_str(whole, WIRE_FORMAT).ok()?;

    match zone {
        Some(zone) => Some(
            zone.from_local_datetime(&naive)
                .single()?
                .with_timezone(&Utc),
        ),
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

/// Formats a UTC timestamp for the wire, inverse of
/// [`parse_wire_timestamp`].
pub(crate) fn format_wire_timestamp(time: DateTime<Utc>, zone: Option<FixedOffset>) -> String {
    match zone {
        Some(zone) => time.with_timezone(&zone).format(WIRE_FORMAT).to_string(),
        None => time.format(WIRE_FORMAT).to_string(),
    }
}

/// Modification time of the remote file via `MDTM`, `None` when the
/// server has no answer for the path. A rejected command or an
/// unparsable reply is not an error.
pub(crate) async fn modified_time<C>(
    channel: &mut C,
    path: &str,
    zone: Option<FixedOffset>,
) -> Result<Option<DateTime<Utc>>, Error>
where
    C: CommandChannel,
{
    let _ = validate_path(path)?;

    let command = format!("MDTM {}", channel.encode_path(path));
    let reply = channel.execute(&command).await?;
    if !reply.success {
        debug!("MDTM failed for {}: {} {}", path, reply.code, reply.message);
        return Ok(None);
    }

    let parsed = parse_wire_timestamp(&reply.message, zone);
    if parsed.is_none() {
        warn!("unparsable MDTM reply for {}: {:?}", path, reply.message);
    }

    Ok(parsed)
}

/// Sets the modification time of the remote file via `MFMT`. A server
/// rejection is surfaced as [`Error::Rejected`].
pub(crate) async fn set_modified_time<C>(
    channel: &mut C,
    path: &str,
    time: DateTime<Utc>,
    zone: Option<FixedOffset>,
) -> Result<(), Error>
where
    C: CommandChannel,
{
    let _ = validate_path(path)?;

    let stamp = format_wire_timestamp(time, zone);
    let command = format!("MFMT {} {}", stamp, channel.encode_path(path));
    let reply = channel.execute(&command).await?;
    if reply.success {
        Ok(())
    } else {
        Err(Error::Rejected(reply))
    }
}

#[cfg(test)]
mod test_time_query {
    use chrono::Timelike;

    use super::*;
    use crate::mock::{ok, refused, ScriptedLink};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_wire_timestamp_as_utc() {
        let parsed = parse_wire_timestamp("20240131120000", None).unwrap();
        assert_eq!(parsed, utc(2024, 1, 31, 12, 0, 0));
    }

    #[test]
    fn drops_subsecond_fraction() {
        let parsed = parse_wire_timestamp("20240131120000.123", None).unwrap();
        assert_eq!(parsed.nanosecond(), 0);
        assert_eq!(parsed, utc(2024, 1, 31, 12, 0, 0));
    }

    #[test]
    fn applies_server_zone_on_parse() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let parsed = parse_wire_timestamp("20240131120000", Some(zone)).unwrap();
        assert_eq!(parsed, utc(2024, 1, 31, 10, 0, 0));
    }

    #[test]
    fn formats_through_inverse_zone() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let formatted = format_wire_timestamp(utc(2024, 1, 31, 10, 0, 0), Some(zone));
        assert_eq!(formatted, "20240131120000");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_wire_timestamp("yesterday", None).is_none());
        assert!(parse_wire_timestamp("", None).is_none());
    }

    #[tokio::test]
    async fn modified_time_returns_parsed_reply() {
        let mut link = ScriptedLink::default();
        link.push_reply(ok("20240131120000"));

        let time = modified_time(&mut link, "/pub/a.txt", None).await.unwrap();

        assert_eq!(time, Some(utc(2024, 1, 31, 12, 0, 0)));
        assert_eq!(link.commands, vec!["MDTM /pub/a.txt"]);
    }

    #[tokio::test]
    async fn modified_time_is_none_on_failure() {
        let mut link = ScriptedLink::default();
        link.push_reply(refused("550 no such file"));

        let time = modified_time(&mut link, "/pub/gone", None).await.unwrap();

        assert_eq!(time, None);
    }

    #[tokio::test]
    async fn modified_time_is_none_on_unparsable_reply() {
        let mut link = ScriptedLink::default();
        link.push_reply(ok("last tuesday"));

        let time = modified_time(&mut link, "/pub/a.txt", None).await.unwrap();

        assert_eq!(time, None);
    }

    #[tokio::test]
    async fn set_modified_time_issues_mfmt() {
        let mut link = ScriptedLink::default();
        link.push_reply(ok("modified time set"));

        set_modified_time(&mut link, "/pub/a.txt", utc(2024, 1, 31, 12, 0, 0), None)
            .await
            .unwrap();

        assert_eq!(link.commands, vec!["MFMT 20240131120000 /pub/a.txt"]);
    }

    #[tokio::test]
    async fn set_modified_time_surfaces_rejection() {
        let mut link = ScriptedLink::default();
        link.push_reply(refused("550 permission denied"));

        let result =
            set_modified_time(&mut link, "/pub/a.txt", utc(2024, 1, 31, 12, 0, 0), None).await;

        assert!(matches!(result, Err(Error::Rejected(_))));
    }

    #[tokio::test]
    async fn blank_path_fails_validation() {
        let mut link = ScriptedLink::default();

        assert!(matches!(
            modified_time(&mut link, "", None).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            set_modified_time(&mut link, " ", utc(2024, 1, 31, 12, 0, 0), None).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(link.commands.is_empty());
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let mut link = ScriptedLink::default();
        link.echo_mfmt = true;
        let written = utc(2023, 6, 15, 8, 30, 45);

        set_modified_time(&mut link, "/pub/a.txt", written, None)
            .await
            .unwrap();
        let read = modified_time(&mut link, "/pub/a.txt", None).await.unwrap();

        assert_eq!(read, Some(written));
    }
}
