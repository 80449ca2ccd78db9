use std::future::Future;
use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket};
use tracing::{Instrument, info};

use crate::config::Config;
use crate::error::ServerError;
use crate::files::StaticFiles;
use crate::http::connection::Connection;

/// Creates the listening socket: reuse-addr, bind, then listen with `backlog`.
pub fn bind(addr: SocketAddr, backlog: u32) -> Result<TcpListener, ServerError> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(ServerError::setup("Error creating socket"))?;

    socket
        .set_reuseaddr(true)
        .map_err(ServerError::setup("Error setting socket options"))?;
    socket
        .bind(addr)
        .map_err(ServerError::setup("Error binding socket"))?;

    socket
        .listen(backlog)
        .map_err(ServerError::setup("Error listening on socket"))
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn run(cfg: &Config, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
    if cfg.buffer_size == 0 {
        return Err(ServerError::Config("buffer size must be at least 1 byte"));
    }

    let listener = bind(cfg.listen_addr(), cfg.backlog)?;
    serve(listener, cfg, shutdown).await
}

/// Accepts and serves connections one at a time.
///
/// `shutdown` is raced against both the accept and the in-flight connection;
/// when it wins mid-connection the connection is dropped, closing its socket
/// and releasing whatever it holds.
pub async fn serve(
    listener: TcpListener,
    cfg: &Config,
    shutdown: impl Future<Output = ()>,
) -> Result<(), ServerError> {
    let files = StaticFiles::from_config(cfg);
    info!("Listening on {}", listener.local_addr()?);

    tokio::pin!(shutdown);

    loop {
        let (socket, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        };
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, cfg.buffer_size, &files);
        tokio::select! {
            res = conn.run().instrument(tracing::info_span!("conn", %peer)) => {
                if let Err(e) = res {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received, closing connection from {}", peer);
                break;
            }
        }
    }

    Ok(())
}
