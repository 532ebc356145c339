//! XHTML escaping.
//!
//! Scans for the first escapable byte with memchr, then bulk-copies the
//! segments between escapes.

use memchr::{memchr, memchr3};

/// Bytes escaped in text content.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table
};

/// Bytes escaped in attribute values.
const ATTR_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Escape text content into `out`.
///
/// # Example
/// ```
/// use smartmark::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, "a < b && c");
/// assert_eq!(out, b"a &lt; b &amp;&amp; c");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &str) {
    let bytes = input.as_bytes();
    match memchr3(b'<', b'>', b'&', bytes) {
        Some(first) => escape_from(out, bytes, first, &TEXT_ESCAPE_TABLE),
        None => out.extend_from_slice(bytes),
    }
}

/// Escape an attribute value into `out`, including double quotes.
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &str) {
    let bytes = input.as_bytes();
    let first = match (memchr3(b'<', b'>', b'&', bytes), memchr(b'"', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    match first {
        Some(first) => escape_from(out, bytes, first, &ATTR_ESCAPE_TABLE),
        None => out.extend_from_slice(bytes),
    }
}

fn escape_from(out: &mut Vec<u8>, input: &[u8], first: usize, table: &[bool; 256]) {
    out.extend_from_slice(&input[..first]);
    let mut pos = first;
    while pos < input.len() {
        let start = pos;
        while pos < input.len() && !table[input[pos] as usize] {
            pos += 1;
        }
        out.extend_from_slice(&input[start..pos]);
        if pos < input.len() {
            out.extend_from_slice(match input[pos] {
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'&' => b"&amp;",
                _ => b"&quot;",
            });
            pos += 1;
        }
    }
}
