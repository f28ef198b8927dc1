use std::time::SystemTime;

use httpdate::fmt_http_date;

use crate::http::request::Version;

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = concat!("warden/", env!("CARGO_PKG_VERSION"));

/// HTTP status codes emitted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use warden::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::UnsupportedMediaType.as_u16(), 415);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    /// Statuses after which the connection is always closed, whatever the
    /// client negotiated.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StatusCode::BadRequest
                | StatusCode::InternalServerError
                | StatusCode::NotImplemented
                | StatusCode::HttpVersionNotSupported
        )
    }
}

/// Ordered header collection.
///
/// Serialization follows insertion order, so output bytes are deterministic.
/// Names compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value in place if the name exists, appends otherwise.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A complete HTTP response ready to be serialized.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Protocol version echoed on the status line
    pub version: Version,
    /// Headers in serialization order
    pub headers: Headers,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    version: Version,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: Version::Http11,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Starts a builder pre-filled with the `Date` and `Server` headers every
    /// response carries.
    pub fn standard(status: StatusCode) -> Self {
        Self::new(status)
            .header("Date", fmt_http_date(SystemTime::now()))
            .header("Server", SERVER_NAME)
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Adds a Content-Length matching the body unless one was set explicitly
    /// (HEAD and 304 responses report a length that differs from the body).
    pub fn build(mut self) -> Response {
        if !self.headers.contains("Content-Length") {
            self.headers
                .set("Content-Length", self.body.len().to_string());
        }

        Response {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Minimal HTML error page for `status`.
    pub fn error(status: StatusCode) -> Self {
        Self::error_with_version(status, Version::Http11)
    }

    pub fn error_with_version(status: StatusCode, version: Version) -> Self {
        let body = format!(
            "<html><body><h1>{} {}</h1></body></html>",
            status.as_u16(),
            status.reason_phrase()
        );

        ResponseBuilder::standard(status)
            .version(version)
            .header("Content-Type", "text/html")
            .body(body.into_bytes())
            .build()
    }

    /// Drops the body for a HEAD request. Content-Length is left untouched.
    pub fn into_head(mut self) -> Self {
        self.body.clear();
        self
    }

    /// Records the keep-alive decision in an explicit `Connection` header.
    pub fn set_keep_alive(&mut self, keep_alive: bool) {
        let value = if keep_alive { "keep-alive" } else { "close" };
        self.headers.set("Connection", value);
    }

    pub fn keep_alive(&self) -> bool {
        self.headers
            .get("Connection")
            .map(|v| v.eq_ignore_ascii_case("keep-alive"))
            .unwrap_or(false)
    }
}
