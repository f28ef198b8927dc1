use std::collections::HashMap;

/// HTTP request methods served by warden.
///
/// Anything else on the request line is answered with 501 Not Implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

/// Protocol versions accepted on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Method {
    /// Parses a method token. Matching ignores ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use warden::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("head"), Some(Method::HEAD));
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }
}

impl Version {
    /// Parses the version token. Only the exact strings `HTTP/1.0` and
    /// `HTTP/1.1` are accepted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "HTTP/1.0" => Some(Version::Http10),
            "HTTP/1.1" => Some(Version::Http11),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
        }
    }
}

/// A parsed request header block.
///
/// Created once per request by the parser and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET or HEAD)
    pub method: Method,
    /// Root-relative, percent-decoded, normalized path (no leading `/`)
    pub path: String,
    /// Protocol version from the request line
    pub version: Version,
    /// Headers keyed by lower-cased name; the last occurrence wins
    pub headers: HashMap<String, String>,
    /// The request line exactly as received
    pub request_line: String,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<Version>,
    headers: HashMap<String, String>,
    request_line: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
            request_line: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn request_line(mut self, line: impl Into<String>) -> Self {
        self.request_line = Some(line.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let method = self.method.ok_or("method missing")?;
        let path = self.path.ok_or("path missing")?;
        let version = self.version.unwrap_or(Version::Http11);
        let request_line = self.request_line.unwrap_or_else(|| {
            format!("{} /{} {}", method.as_str(), path, version.as_str())
        });

        Ok(Request {
            method,
            path,
            version,
            headers: self.headers,
            request_line,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the client negotiated a persistent connection.
    ///
    /// HTTP/1.1 persists unless the client sent `Connection: close`;
    /// HTTP/1.0 closes unless the client sent `Connection: keep-alive`.
    /// The response status may still force a close afterwards.
    pub fn keep_alive(&self) -> bool {
        let connection = self.header("Connection");
        match self.version {
            Version::Http11 => !connection
                .map(|v| v.eq_ignore_ascii_case("close"))
                .unwrap_or(false),
            Version::Http10 => connection
                .map(|v| v.eq_ignore_ascii_case("keep-alive"))
                .unwrap_or(false),
        }
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}
