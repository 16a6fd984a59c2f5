//! Percent-encoding used for every rendered URL component.
//!
//! Alphanumerics and `- _ . ! ~ * ' ( )` pass through, space becomes `%20`
//! and everything else is escaped from its UTF-8 bytes with uppercase hex.
//! Decoding never fails: a `%` that does not start a valid triple and any
//! invalid UTF-8 produced by decoding turn into U+FFFD. A literal `+` stays a
//! `+`; this is not form encoding.

use percent_encoding::{percent_decode, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in any component.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Same as [`UNRESERVED`] but keeps the path separator.
const PATH_SAFE: &AsciiSet = &UNRESERVED.remove(b'/');

const REPLACEMENT: &str = "\u{FFFD}";

/// Escapes `text` as a single component; `/` is escaped too.
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, UNRESERVED).to_string()
}

/// Escapes `text` as path-structured text; `/` passes through.
pub fn encode_path(text: &str) -> String {
    utf8_percent_encode(text, PATH_SAFE).to_string()
}

/// Reverses [`encode`] and [`encode_path`].
pub fn decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && !is_escape(&bytes[i..]) {
            out.extend(percent_decode(&bytes[start..i]));
            out.extend_from_slice(REPLACEMENT.as_bytes());
            start = i + 1;
        }
        i += 1;
    }
    out.extend(percent_decode(&bytes[start..]));
    String::from_utf8_lossy(&out).into_owned()
}

/// True if `rest` starts with `%` followed by two hex digits.
fn is_escape(rest: &[u8]) -> bool {
    rest.len() >= 3 && rest[1].is_ascii_hexdigit() && rest[2].is_ascii_hexdigit()
}
