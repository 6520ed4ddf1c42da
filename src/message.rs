//! Pieces shared by [`Request`](crate::Request) and
//! [`Response`](crate::Response): parse state and head serialization.

use crate::headers::Headers;
use crate::tokenizer::{Config, Kind, Tokenizer};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

pub(crate) const CONTENT_LENGTH: &str = "Content-Length";
pub(crate) const AUTHORIZATION: &str = "Authorization";

/// Room for `Content-Length:<20 digits>\r\n` plus the blank line.
const CONTENT_LENGTH_LINE_BOUND: usize = CONTENT_LENGTH.len() + 1 + 20 + 2 + 2;

/// Where an entity is in parsing its current message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseState {
    /// Nothing of a message has been seen yet.
    #[default]
    AwaitingMessage,
    /// The start line or header lines are being read.
    InHeaders,
    /// The body is being read.
    InBody,
    /// The last message is complete.
    Complete,
}

/// Result of feeding a chunk to `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// The message is not complete yet; more bytes are expected.
    Partial,
    /// A complete message has been parsed.
    Complete,
}

/// Transient state an entity keeps while parsing.
#[derive(Debug, Clone)]
pub(crate) struct Parser {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) state: ParseState,
    /// Field name waiting for its value.
    pub(crate) field: Vec<u8>,
}

impl Parser {
    pub(crate) fn new(kind: Kind, config: Config) -> Self {
        Self {
            tokenizer: Tokenizer::with_config(kind, config),
            state: ParseState::AwaitingMessage,
            field: Vec::new(),
        }
    }

    pub(crate) fn status(&self) -> ParseStatus {
        if self.state == ParseState::Complete {
            ParseStatus::Complete
        } else {
            ParseStatus::Partial
        }
    }
}

/// Stages a header field name until its value arrives.
pub(crate) fn stage_field(field: &mut Vec<u8>, name: &[u8]) {
    field.clear();
    field.extend_from_slice(name);
}

/// Upserts the staged field with `value` and returns the pair as stored.
pub(crate) fn store_header(headers: &mut Headers, field: &[u8], value: &[u8]) -> (String, String) {
    let field = String::from_utf8_lossy(field).into_owned();
    let value = String::from_utf8_lossy(value).into_owned();
    headers.insert(&field, &value);
    (field, value)
}

/// Upper bound on the bytes [`write_fields`] emits.
pub(crate) fn fields_len_bound(headers: &Headers, body: &[u8]) -> usize {
    headers
        .iter()
        .map(|(field, value)| field.len() + 1 + value.len() + 2)
        .sum::<usize>()
        + CONTENT_LENGTH_LINE_BOUND
        + body.len()
}

/// Writes the header lines, an automatic `Content-Length` when none is set,
/// the blank line and the body.
pub(crate) fn write_fields(out: &mut Vec<u8>, headers: &Headers, body: &[u8]) {
    let mut has_content_length = false;
    for (field, value) in headers.iter() {
        has_content_length |= field.eq_ignore_ascii_case(CONTENT_LENGTH);
        out.extend_from_slice(field.as_bytes());
        out.push(b':');
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    if !has_content_length {
        out.extend_from_slice(CONTENT_LENGTH.as_bytes());
        out.push(b':');
        out.extend_from_slice(decimal(body.len() as u64).as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(body);
}

pub(crate) fn decimal(n: u64) -> heapless::String<20> {
    let mut digits = heapless::String::new();
    // u64::MAX has twenty digits.
    let _ = write!(digits, "{n}");
    digits
}
