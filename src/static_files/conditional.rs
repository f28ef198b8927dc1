use std::time::{SystemTime, UNIX_EPOCH};

use httpdate::parse_http_date;

/// Whether a conditional request can be answered with 304.
///
/// An unparseable `If-Modified-Since` is ignored. HTTP dates have one-second
/// resolution, so the file time is truncated before comparing.
pub fn is_not_modified(modified: SystemTime, if_modified_since: Option<&str>) -> bool {
    let Some(value) = if_modified_since else {
        return false;
    };

    let Ok(since) = parse_http_date(value.trim()) else {
        tracing::debug!(value, "ignoring unparseable If-Modified-Since");
        return false;
    };

    match (unix_secs(modified), unix_secs(since)) {
        (Some(file_secs), Some(since_secs)) => file_secs <= since_secs,
        _ => false,
    }
}

fn unix_secs(t: SystemTime) -> Option<u64> {
    t.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
