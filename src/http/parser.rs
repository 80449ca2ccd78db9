use thiserror::Error;

use crate::http::request::{Header, Request};
use crate::http::scanner::{self, COLON, CRLF, CRLF_CRLF, SP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The method, target or version delimiter is missing.
    #[error("malformed request line")]
    MalformedRequestLine,
    /// A header line has no ':'.
    #[error("malformed header line")]
    MalformedHeaderLine,
}

/// Parses the bytes received on a connection into a [`Request`].
///
/// The header block runs to the first `"\r\n\r\n"` and the body is everything
/// after it. Without a terminator the whole remainder is read as headers and
/// the body is empty; an unterminated last line is dropped. Requests cut short
/// by the buffer cap therefore parse as whatever complete lines arrived.
pub fn parse_request(buf: &[u8]) -> Result<Request, ParseError> {
    // Request line
    let line_end = scanner::find(buf, CRLF, 0).ok_or(ParseError::MalformedRequestLine)?;
    let request_line = &buf[..line_end];

    let method_end =
        scanner::find_byte(request_line, SP, 0).ok_or(ParseError::MalformedRequestLine)?;
    let path_end = scanner::find_byte(request_line, SP, method_end + 1)
        .ok_or(ParseError::MalformedRequestLine)?;

    let method = text(&request_line[..method_end]);
    let path = text(&request_line[method_end + 1..path_end]);
    let version = text(&request_line[path_end + 1..]);

    // Header block / body split. Searching from the request line's own CRLF
    // lets "\r\n\r\n" directly after it mean "no headers".
    let (header_block, body) = match scanner::find(buf, CRLF_CRLF, line_end) {
        Some(end) => (&buf[line_end + 2..end + 2], buf[end + 4..].to_vec()),
        None => (&buf[line_end + 2..], Vec::new()),
    };

    let headers = parse_headers(header_block)?;

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
    })
}

/// Splits a header block into CRLF-terminated lines.
fn parse_headers(block: &[u8]) -> Result<Vec<Header>, ParseError> {
    let mut headers = Vec::new();
    let mut start = 0;

    while let Some(end) = scanner::find(block, CRLF, start) {
        headers.push(parse_header_line(&block[start..end])?);
        start = end + 2;
    }

    Ok(headers)
}

fn parse_header_line(line: &[u8]) -> Result<Header, ParseError> {
    let colon = scanner::find_byte(line, COLON, 0).ok_or(ParseError::MalformedHeaderLine)?;

    let rest = &line[colon + 1..];
    let value = rest.strip_prefix(b" ").unwrap_or(rest);

    Ok(Header {
        key: text(&line[..colon]),
        value: text(value),
    })
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request(req).unwrap();

        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn header_without_space_keeps_value_intact() {
        let parsed = parse_request(b"GET / HTTP/1.1\r\nHost:x\r\n\r\n").unwrap();
        assert_eq!(parsed.header("Host"), Some("x"));
    }

    #[test]
    fn only_one_separator_space_is_removed() {
        let parsed = parse_request(b"GET / HTTP/1.1\r\nX-Pad:   v \r\n\r\n").unwrap();
        assert_eq!(parsed.header("X-Pad"), Some("  v "));
    }

    #[test]
    fn empty_value_after_colon() {
        let parsed = parse_request(b"GET / HTTP/1.1\r\nX-Empty:\r\n\r\n").unwrap();
        assert_eq!(parsed.header("X-Empty"), Some(""));
    }
}
