//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.0 and HTTP/1.1 subset warden speaks:
//! GET and HEAD, persistent connections and pipelined requests.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection request-response state machine
//! - **`parser`**: Turns a header block into a [`request::Request`] or a [`parser::ParseError`]
//! - **`request`**: Request representation and keep-alive negotiation
//! - **`response`**: Status codes, ordered headers and the response builder
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: Extension to MIME type allow-list
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Read until a blank line ends the headers
//!        └──────┬───────────┘
//!               │ Header block split off the buffer
//!               ▼
//!        ┌──────────────────┐
//!        │  RequestParsed   │ ← Resolve, check conditionals, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Write, then log the exchange
//!        └──────┬───────────┘
//!               │
//!               ├─ Keep-Alive → AwaitingRequest (same connection)
//!               └─ Close → Closed
//! ```
//!
//! Parse failures and the statuses 400, 500, 501 and 505 always end in
//! `Closed`. EOF or an idle timeout while awaiting a request does too.

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
