use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use warden::access_log::{AccessLog, FileAccessLog, format_entry};
use warden::http::response::StatusCode;

#[test]
fn test_format_entry() {
    let at = UNIX_EPOCH + Duration::from_secs(784_111_777);
    let line = format_entry(at, "127.0.0.1:5000", "GET /index.html HTTP/1.1", StatusCode::NotFound);

    assert_eq!(
        line,
        "Sun, 06 Nov 1994 08:49:37 GMT - 127.0.0.1:5000 - \"GET /index.html HTTP/1.1\" - 404 Not Found"
    );
}

#[test]
fn test_file_log_appends_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.log");

    let log = FileAccessLog::open(&path).unwrap();
    log.record("1.2.3.4:1", "GET / HTTP/1.1", StatusCode::Ok);
    log.record("1.2.3.4:1", "POST / HTTP/1.1", StatusCode::NotImplemented);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" - 1.2.3.4:1 - \"GET / HTTP/1.1\" - 200 OK"));
    assert!(lines[1].ends_with("\"POST / HTTP/1.1\" - 501 Not Implemented"));
}

#[test]
fn test_file_log_lines_never_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.log");
    let log = Arc::new(FileAccessLog::open(&path).unwrap());

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for j in 0..50 {
                    let line = format!("GET /t{}/{} HTTP/1.1", i, j);
                    log.record("client", &line, StatusCode::Ok);
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 400);
    assert!(contents.lines().all(|l| l.ends_with("HTTP/1.1\" - 200 OK")));
}

#[test]
fn test_file_log_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("access.log");

    assert!(FileAccessLog::open(&path).is_err());
}
