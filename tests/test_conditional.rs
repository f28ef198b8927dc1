use std::time::{Duration, SystemTime, UNIX_EPOCH};

use httpdate::fmt_http_date;
use warden::static_files::conditional::is_not_modified;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn test_no_header_means_modified() {
    assert!(!is_not_modified(at(1_000_000), None));
}

#[test]
fn test_same_second_is_not_modified() {
    let modified = at(1_000_000) + Duration::from_millis(750);
    let since = fmt_http_date(at(1_000_000));

    assert!(is_not_modified(modified, Some(&since)));
}

#[test]
fn test_later_since_is_not_modified() {
    let since = fmt_http_date(at(2_000_000));
    assert!(is_not_modified(at(1_000_000), Some(&since)));
}

#[test]
fn test_newer_file_is_modified() {
    let since = fmt_http_date(at(1_000_000));
    assert!(!is_not_modified(at(1_000_001), Some(&since)));
}

#[test]
fn test_unparseable_date_is_ignored() {
    assert!(!is_not_modified(at(1_000_000), Some("yesterday")));
    assert!(!is_not_modified(at(1_000_000), Some("")));
}

#[test]
fn test_rfc1123_literal() {
    // 784111777 == Sun, 06 Nov 1994 08:49:37 GMT
    let since = "Sun, 06 Nov 1994 08:49:37 GMT";
    assert!(is_not_modified(at(784_111_777), Some(since)));
    assert!(!is_not_modified(at(784_111_778), Some(since)));
}
