//! Delimiter search over a received buffer.
//!
//! Every search is bounded by the slice it is given, so a buffer without the
//! delimiter is never scanned past its length.

pub const SP: u8 = b' ';
pub const COLON: u8 = b':';
pub const CRLF: &[u8] = b"\r\n";
pub const CRLF_CRLF: &[u8] = b"\r\n\r\n";

/// Position of the first `byte` at or after `from`.
pub fn find_byte(buf: &[u8], byte: u8, from: usize) -> Option<usize> {
    buf.get(from..)?
        .iter()
        .position(|&b| b == byte)
        .map(|pos| from + pos)
}

/// Position of the first occurrence of `needle` starting at or after `from`.
pub fn find(buf: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    buf.get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| from + pos)
}
