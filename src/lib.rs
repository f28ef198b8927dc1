//! Warden - static file HTTP/1.x server
//!
//! Parses requests off the socket, resolves them inside a document root and
//! answers with GET/HEAD semantics, conditional caching and keep-alive.

pub mod access_log;
pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
