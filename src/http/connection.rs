use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::files::{HandleError, StaticFiles};
use crate::http::parser::{ParseError, parse_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::scanner::{self, CRLF_CRLF};
use crate::http::writer::{ResponseWriter, serialize_response};

const READ_CHUNK: usize = 1024;

/// A single request/response exchange on an accepted stream.
///
/// Each state owns what it needs; moving to the next state drops the previous
/// state's buffer, request or response, so each is released exactly once on
/// every path to `Closed`.
pub struct Connection<'a, S> {
    stream: S,
    buffer: BytesMut,
    buffer_size: usize,
    files: &'a StaticFiles,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    Idle,
    Reading,
    Parsed(Request),
    ParseFailed(ParseError),
    Handled(Response),
    HandleFailed(HandleError),
    Closed,
}

impl ConnectionState {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Reading => "reading",
            ConnectionState::Parsed(_) => "parsed",
            ConnectionState::ParseFailed(_) => "parse-failed",
            ConnectionState::Handled(_) => "handled",
            ConnectionState::HandleFailed(_) => "handle-failed",
            ConnectionState::Closed => "closed",
        }
    }
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, buffer_size: usize, files: &'a StaticFiles) -> Self {
        Self {
            stream,
            buffer: BytesMut::new(),
            buffer_size,
            files,
            state: ConnectionState::Idle,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection to `Closed`.
    ///
    /// Read and write failures end this connection only; the error is
    /// returned for the caller to log.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);
            tracing::trace!(state = state.name(), "Connection step");

            self.state = match state {
                ConnectionState::Idle => {
                    self.buffer = BytesMut::with_capacity(self.buffer_size);
                    ConnectionState::Reading
                }

                ConnectionState::Reading => {
                    let received = self.read_request().await?;
                    let buffer = std::mem::take(&mut self.buffer);

                    if received == 0 {
                        tracing::debug!("Peer closed before sending a request");
                        ConnectionState::Closed
                    } else {
                        tracing::debug!(bytes = received, "Request received");
                        match parse_request(&buffer) {
                            Ok(req) => ConnectionState::Parsed(req),
                            Err(e) => ConnectionState::ParseFailed(e),
                        }
                    }
                }

                ConnectionState::Parsed(req) => match self.files.handle(&req).await {
                    Ok(response) => {
                        tracing::info!(
                            method = %req.method,
                            path = %req.path,
                            status = response.status.as_u16(),
                            bytes = response.body.len(),
                            "Request served"
                        );
                        ConnectionState::Handled(response)
                    }
                    Err(e) => {
                        tracing::warn!(
                            method = %req.method,
                            path = %req.path,
                            error = %e,
                            "Request not handled"
                        );
                        ConnectionState::HandleFailed(e)
                    }
                },

                ConnectionState::ParseFailed(e) => {
                    tracing::warn!(error = %e, "Request not parsed");
                    self.respond(&Response::bad_request()).await?;
                    ConnectionState::Closed
                }

                ConnectionState::HandleFailed(e) => {
                    let response = self.files.error_response(&e);
                    self.respond(&response).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Handled(response) => {
                    self.respond(&response).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    break;
                }
            };
        }

        Ok(())
    }

    /// Reads until the header terminator arrives, the peer stops sending,
    /// or the buffer holds `buffer_size` bytes. Returns the bytes held.
    async fn read_request(&mut self) -> anyhow::Result<usize> {
        let mut temp = [0u8; READ_CHUNK];
        let mut scanned = 0;

        loop {
            if scanner::find(&self.buffer, CRLF_CRLF, scanned).is_some() {
                break;
            }
            // A terminator may straddle the next chunk boundary.
            scanned = self.buffer.len().saturating_sub(CRLF_CRLF.len() - 1);

            let remaining = self.buffer_size.saturating_sub(self.buffer.len());
            if remaining == 0 {
                tracing::debug!(cap = self.buffer_size, "Request reached buffer cap");
                break;
            }

            let want = remaining.min(temp.len());
            let n = self.stream.read(&mut temp[..want]).await?;

            if n == 0 {
                break;
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }

        Ok(self.buffer.len())
    }

    async fn respond(&mut self, response: &Response) -> anyhow::Result<()> {
        let bytes = serialize_response(response);
        tracing::debug!(status = %response.status, bytes = bytes.len(), "Writing response");
        let mut writer = ResponseWriter::new(bytes);
        writer.write_to_stream(&mut self.stream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::Resolver;
    use tokio::io::duplex;

    async fn exchange(request: &[u8], buffer_size: usize) -> Vec<u8> {
        let files = StaticFiles::new(Resolver::new("does-not-exist"));
        let (mut client, server) = duplex(64 * 1024);

        client.write_all(request).await.unwrap();

        let mut conn = Connection::new(server, buffer_size, &files);
        conn.run().await.unwrap();
        assert!(matches!(conn.state(), ConnectionState::Closed));
        drop(conn);

        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn garbage_gets_bad_request() {
        let out = exchange(b"garbage\r\n\r\n", 1024).await;
        assert_eq!(out, b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n");
    }

    #[tokio::test]
    async fn unsupported_method_gets_bad_request() {
        let out = exchange(b"POST / HTTP/1.1\r\n\r\n", 1024).await;
        assert_eq!(out, b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n");
    }

    #[tokio::test]
    async fn read_stops_at_buffer_cap() {
        // 19 bytes cover only the request line; the broken header is never seen.
        let files = StaticFiles::new(Resolver::new("does-not-exist"));
        let (mut client, server) = duplex(1024);
        client
            .write_all(b"DELETE / HTTP/1.1\r\nBroken\r\n\r\n")
            .await
            .unwrap();

        let mut conn = Connection::new(server, 19, &files);
        let received = conn.read_request().await.unwrap();
        assert_eq!(received, 19);
        assert_eq!(parse_request(&conn.buffer).unwrap().headers.len(), 0);
    }
}
