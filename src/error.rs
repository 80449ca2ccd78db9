//! Process-level errors.
//!
//! Per-request failures (`ParseError`, `HandleError`) are answered on the
//! connection and never reach this type; `ServerError` covers the failures
//! that stop the server.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket creation, option, bind or listen failure.
    #[error("{context}: {source}")]
    Setup {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// Configuration that cannot produce a working listener.
    #[error("invalid configuration: {0}")]
    Config(&'static str),

    /// Accept failure on an established listener.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    pub(crate) fn setup(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| ServerError::Setup { context, source }
    }
}
