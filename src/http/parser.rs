use std::collections::HashMap;

use percent_encoding::percent_decode;
use thiserror::Error;

use crate::http::request::{Method, Request, Version};
use crate::http::response::StatusCode;

/// Why a header block could not become a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedLine,
    #[error("unsupported method")]
    UnsupportedMethod,
    #[error("unsupported protocol version")]
    UnsupportedVersion,
    #[error("missing Host header")]
    MissingHostHeader,
    #[error("path escapes the document root")]
    ForbiddenPath,
    #[error("header block exceeds the configured limit")]
    HeaderTooLarge,
}

impl ParseError {
    /// Status code sent back for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::MalformedLine
            | ParseError::MissingHostHeader
            | ParseError::HeaderTooLarge => StatusCode::BadRequest,
            ParseError::UnsupportedMethod => StatusCode::NotImplemented,
            ParseError::UnsupportedVersion => StatusCode::HttpVersionNotSupported,
            ParseError::ForbiddenPath => StatusCode::Forbidden,
        }
    }
}

/// Returns the offset of the `\r\n\r\n` that terminates the header block.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parses one header block (with or without its terminating blank line).
///
/// Bytes are decoded as Latin-1 so arbitrary octets never fail decoding.
pub fn parse_http_request(block: &[u8]) -> Result<Request, ParseError> {
    let text = decode_latin1(block);
    let mut lines = text.split("\r\n");

    let request_line = lines.next().ok_or(ParseError::MalformedLine)?;
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    let &[method_str, target, version_str] = parts.as_slice() else {
        return Err(ParseError::MalformedLine);
    };

    let version = Version::from_str(version_str).ok_or(ParseError::UnsupportedVersion)?;

    let method = match Method::from_str(method_str) {
        Some(m) => m,
        None if is_token(method_str) => return Err(ParseError::UnsupportedMethod),
        None => return Err(ParseError::MalformedLine),
    };

    if !target.starts_with('/') {
        return Err(ParseError::MalformedLine);
    }
    let path = normalize_path(target)?;

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        // Lines without a colon are skipped rather than rejected.
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    if version == Version::Http11 && !headers.contains_key("host") {
        return Err(ParseError::MissingHostHeader);
    }

    Ok(Request {
        method,
        path,
        version,
        headers,
        request_line: request_line.to_string(),
    })
}

/// Turns a request target into a root-relative path.
///
/// Query and fragment are dropped and the remainder percent-decoded before
/// any `..` segment is looked for, so encoded traversal is caught too.
/// Only then are empty and `.` segments collapsed.
pub fn normalize_path(target: &str) -> Result<String, ParseError> {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let raw = encode_latin1(&target[..end]);
    let decoded = percent_decode(&raw).decode_utf8_lossy();

    if decoded.contains('\0') {
        return Err(ParseError::ForbiddenPath);
    }
    if decoded.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(ParseError::ForbiddenPath);
    }

    let segments: Vec<&str> = decoded
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    Ok(segments.join("/"))
}

/// First line of a header block, for access logging of rejected requests.
pub fn request_line_of(block: &[u8]) -> String {
    let text = decode_latin1(block);
    let line = text.split("\r\n").next().unwrap_or("").trim();
    if line.is_empty() {
        "<invalid request>".to_string()
    } else {
        line.to_string()
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// Inverse of decode_latin1; every char here came from a single octet.
fn encode_latin1(s: &str) -> Vec<u8> {
    s.chars().map(|c| c as u32 as u8).collect()
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
