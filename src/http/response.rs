use std::fmt;

use bytes::Bytes;

use crate::http::request::Header;

/// Version written on every response.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed or unsupported request, and by default missing files
/// - `NotFound` (404): Missing file, when configured to tell it apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Status line text, e.g. `200 OK`.
impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// The body carries its own length and may hold arbitrary binary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub version: String,
    pub status: StatusCode,
    /// Headers in the order they are written
    pub headers: Vec<Header>,
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// Unlike many builders this one adds no headers of its own: the response
/// carries exactly the headers that were set.
///
/// # Example
///
/// ```
/// # use tinyserve::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body("hi")
///     .build();
/// assert_eq!(response.headers.len(), 1);
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<Header>,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Appends a header after those already set.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            version: HTTP_VERSION.to_string(),
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK carrying a whole file and its `Content-Type`.
    pub fn file(content_type: &str, contents: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .body(contents)
            .build()
    }

    /// 400 Bad Request with `Content-Length: 0` and no body.
    pub fn bad_request() -> Self {
        Self::empty(StatusCode::BadRequest)
    }

    /// 404 Not Found with `Content-Length: 0` and no body.
    pub fn not_found() -> Self {
        Self::empty(StatusCode::NotFound)
    }

    fn empty(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Length", "0")
            .build()
    }

    /// Value of the first header whose key matches exactly.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_str())
    }
}
