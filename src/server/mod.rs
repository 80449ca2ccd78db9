//! Listening socket and the accept loop.

pub mod listener;

pub use listener::{bind, run, serve};
