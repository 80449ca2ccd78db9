use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Directory served when nothing else is configured.
pub const DEFAULT_DOCUMENT_ROOT: &str = "public";

/// Runtime configuration.
///
/// Only the three positional arguments come from the command line; the
/// remaining fields carry fixed defaults and can be overridden by embedders.
#[derive(Debug, Clone, Parser)]
#[command(name = "tinyserve")]
#[command(about = "Minimal single-process HTTP/1.x static file server")]
#[command(version)]
pub struct Config {
    /// Port to listen on (all interfaces)
    pub port: u16,

    /// Maximum number of pending connections queued by the listener
    pub backlog: u32,

    /// Per-connection read buffer size in bytes; also caps the request size
    pub buffer_size: usize,

    /// Directory under which all servable files are resolved
    #[arg(skip = PathBuf::from(DEFAULT_DOCUMENT_ROOT))]
    pub document_root: PathBuf,

    /// Answer missing files with 404 instead of the historical 400
    #[arg(skip)]
    pub distinguish_not_found: bool,
}

impl Config {
    pub fn new(port: u16, backlog: u32, buffer_size: usize) -> Self {
        Self {
            port,
            backlog,
            buffer_size,
            document_root: PathBuf::from(DEFAULT_DOCUMENT_ROOT),
            distinguish_not_found: false,
        }
    }

    pub fn with_document_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.document_root = root.into();
        self
    }

    /// Address the listener binds to (INADDR_ANY on the configured port).
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
