//! Percent encoding for query values (`application/x-www-form-urlencoded`).

use alloc::string::String;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything but the unreserved bytes. Space is left alone here and
/// rewritten to `+` by [`encode_into`].
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

/// Appends `value` to `out`, escaping everything but unreserved bytes.
/// Spaces become `+`.
pub(crate) fn encode_into(value: &str, out: &mut String) {
    for piece in utf8_percent_encode(value, QUERY_VALUE) {
        out.extend(piece.chars().map(|c| if c == ' ' { '+' } else { c }));
    }
}

/// Decodes `%XX` escapes and `+`. Malformed escapes are kept as-is, and
/// bytes that do not form UTF-8 are replaced.
pub(crate) fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
