use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Exact number of bytes `serialize_response` produces for `resp`.
fn encoded_len(resp: &Response) -> usize {
    let status = resp.status.as_u16().to_string().len() + 1 + resp.status.reason_phrase().len();
    let status_line = resp.version.len() + 1 + status + 2;
    let headers: usize = resp
        .headers
        .iter()
        .map(|h| h.key.len() + 2 + h.value.len() + 2)
        .sum();

    status_line + headers + 2 + resp.body.len()
}

/// Renders `resp` as wire bytes.
///
/// Layout: `"<version> <status>\r\n"`, one `"<key>: <value>\r\n"` per header in
/// order, a blank line, then the body unframed.
pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len(resp));

    // Status line
    buf.put_slice(resp.version.as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.to_string().as_bytes());
    buf.put_slice(b"\r\n");

    // Headers
    for h in &resp.headers {
        buf.put_slice(h.key.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(h.value.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    // Body
    buf.put_slice(&resp.body);

    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    /// Takes bytes already produced by [`serialize_response`].
    pub fn new(buffer: Bytes) -> Self {
        Self { buffer, written: 0 }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::{ResponseBuilder, StatusCode};

    #[test]
    fn capacity_matches_output() {
        let resp = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/html")
            .header("X-Long", "v".repeat(4096))
            .body(vec![0u8; 10])
            .build();

        let bytes = serialize_response(&resp);
        assert_eq!(bytes.len(), encoded_len(&resp));
    }

    #[tokio::test]
    async fn writes_all_bytes_to_stream() {
        let resp = Response::bad_request();
        let mut writer = ResponseWriter::new(serialize_response(&resp));
        let mut out = Vec::new();

        writer.write_to_stream(&mut out).await.unwrap();

        assert_eq!(out, b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n");
    }
}
