use warden::http::request::{Method, RequestBuilder, Version};

#[test]
fn test_request_header_lookup_is_case_insensitive() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("index.html")
        .header("If-Modified-Since", "Sun, 06 Nov 1994 08:49:37 GMT")
        .build()
        .unwrap();

    assert_eq!(req.header("if-modified-since"), Some("Sun, 06 Nov 1994 08:49:37 GMT"));
    assert_eq!(req.header("IF-MODIFIED-SINCE"), Some("Sun, 06 Nov 1994 08:49:37 GMT"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_keep_alive_http11_default() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("")
        .version(Version::Http11)
        .build()
        .unwrap();

    assert!(req.keep_alive());
}

#[test]
fn test_request_keep_alive_http11_close() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("")
        .version(Version::Http11)
        .header("Connection", "Close")
        .build()
        .unwrap();

    assert!(!req.keep_alive());
}

#[test]
fn test_request_keep_alive_http10_default_closes() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("")
        .version(Version::Http10)
        .build()
        .unwrap();

    assert!(!req.keep_alive());
}

#[test]
fn test_request_keep_alive_http10_opt_in() {
    let req = RequestBuilder::new()
        .method(Method::HEAD)
        .path("")
        .version(Version::Http10)
        .header("connection", "Keep-Alive")
        .build()
        .unwrap();

    assert!(req.keep_alive());
    assert!(req.is_head());
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("x").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_builder_default_request_line() {
    let req = RequestBuilder::new()
        .method(Method::HEAD)
        .path("a.txt")
        .version(Version::Http10)
        .build()
        .unwrap();

    assert_eq!(req.request_line, "HEAD /a.txt HTTP/1.0");
}

#[test]
fn test_version_round_trip_strings() {
    assert_eq!(Version::from_str("HTTP/1.0"), Some(Version::Http10));
    assert_eq!(Version::from_str("HTTP/1.1").map(|v| v.as_str()), Some("HTTP/1.1"));
    assert_eq!(Version::from_str("HTTP/2"), None);
}
