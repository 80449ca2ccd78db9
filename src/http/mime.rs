//! MIME type detection module
//!
//! Maps a file's extension to the `Content-Type` it is served with.

use std::path::Path;

/// Content type for a file extension; anything unlisted is plain text.
///
/// Matching is exact and case-sensitive.
///
/// # Examples
/// ```
/// use tinyserve::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html");
/// assert_eq!(get_content_type(Some("HTML")), "text/plain");
/// assert_eq!(get_content_type(None), "text/plain");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "text/plain",
    }
}

/// Content type for the file at `path`, keyed on the text after the last
/// '.' of the file name. A leading dot counts, so `.html` is HTML.
pub fn content_type_for(path: &Path) -> &'static str {
    let suffix = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext);

    get_content_type(suffix)
}
