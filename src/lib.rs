//! Tinyserve - Static File HTTP Server
//!
//! Core library for request parsing, static file resolution and response
//! serialization.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;
