//! HTTP protocol implementation.
//!
//! This module implements the message layer of a one-request-per-connection
//! HTTP/1.x server.
//!
//! # Architecture
//!
//! - **`scanner`**: Bounded delimiter search over the received bytes
//! - **`parser`**: Turns a raw buffer into a [`request::Request`]
//! - **`request`**: HTTP request representation and ordered header storage
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! Each client connection is served exactly once and then closed:
//!
//! ```text
//!        ┌─────────────┐
//!        │    Idle     │ ← Accepted, buffer allocated
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Reading   │ ← Read until "\r\n\r\n", EOF or buffer cap
//!        └──────┬──────┘
//!               ├─ Parsed ──────┬─ Handled ──────→ 200 ─┐
//!               │               └─ HandleFailed ─→ 400 ─┤
//!               └─ ParseFailed ──────────────────→ 400 ─┤
//!                                                       ▼
//!                                                    Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod scanner;
pub mod writer;
