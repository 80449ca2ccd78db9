use tinyserve::http::parser::parse_request;
use tinyserve::http::request::Header;
use tinyserve::http::response::{Response, ResponseBuilder, StatusCode};
use tinyserve::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_line_text() {
    assert_eq!(StatusCode::Ok.to_string(), "200 OK");
    assert_eq!(StatusCode::BadRequest.to_string(), "400 Bad Request");
    assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
}

#[test]
fn test_response_builder_adds_no_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.version, "HTTP/1.1");
    assert!(response.headers.is_empty());
    assert_eq!(&response.body[..], b"Hello, World!");
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-cache")
        .header("X-Frame-Options", "DENY")
        .build();

    let keys: Vec<&str> = response.headers.iter().map(|h| h.key.as_str()).collect();
    assert_eq!(keys, ["Content-Type", "Cache-Control", "X-Frame-Options"]);
}

#[test]
fn test_response_file_helper() {
    let response = Response::file("text/html", "<h1>hi</h1>");

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.headers, vec![Header::new("Content-Type", "text/html")]);
    assert_eq!(response.body.len(), 11);
}

#[test]
fn test_response_bad_request_helper() {
    let response = Response::bad_request();

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.headers, vec![Header::new("Content-Length", "0")]);
    assert!(response.body.is_empty());
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.header("Content-Length"), Some("0"));
    assert!(response.body.is_empty());
}

#[test]
fn test_serialize_file_response() {
    let bytes = serialize_response(&Response::file("text/css", "a{}"));

    assert_eq!(&bytes[..], b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\n\r\na{}");
}

#[test]
fn test_serialize_bad_request() {
    let bytes = serialize_response(&Response::bad_request());

    assert_eq!(
        &bytes[..],
        b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    );
}

#[test]
fn test_serialize_no_headers() {
    let bytes = serialize_response(&ResponseBuilder::new(StatusCode::Ok).build());

    assert_eq!(&bytes[..], b"HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_serialize_binary_body_unframed() {
    let body = vec![0x89, b'P', b'N', b'G', 0x00, 0x00, 0x0d, 0x0a];
    let bytes = serialize_response(&Response::file("image/png", body.clone()));

    assert!(bytes.ends_with(&body));
    assert!(!bytes.ends_with(b"\r\n\r\n"));
}

#[test]
fn test_serialize_long_header_set() {
    let mut builder = ResponseBuilder::new(StatusCode::Ok);
    for i in 0..64 {
        builder = builder.header(format!("X-Header-{i}"), "v".repeat(64));
    }
    let bytes = serialize_response(&builder.build());

    // Far beyond any fixed 1 KiB header buffer.
    assert!(bytes.len() > 4096);
    assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\nX-Header-0: "));
    assert!(bytes.ends_with(b"\r\n\r\n"));
}

#[test]
fn test_serialized_response_reparses() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Content-Type", "text/plain")
        .header("X-Trace", "abc: def")
        .body(b"gone\x00".to_vec())
        .build();

    let bytes = serialize_response(&response);
    let reparsed = parse_request(&bytes).unwrap();

    // Request grammar: "<version> <code> <reason>" lands in method/path/version.
    assert_eq!(reparsed.method, response.version);
    assert_eq!(
        format!("{} {}", reparsed.path, reparsed.version),
        response.status.to_string()
    );
    assert_eq!(reparsed.headers, response.headers);
    assert_eq!(reparsed.body, response.body.to_vec());
}
