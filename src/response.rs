//! HTTP response entity.
//!
//! ```rust
//! use libiot_http::{ParseStatus, Response};
//!
//! let mut response = Response::new();
//! response.set_status(200).set_header("Content-Type", Some("text/plain"));
//! response.set_body(b"ok");
//! assert_eq!(
//!     response.build(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type:text/plain\r\nContent-Length:2\r\n\r\nok"
//! );
//!
//! let mut received = Response::new();
//! let status = received.parse(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
//! assert_eq!(status, Ok(ParseStatus::Complete));
//! assert_eq!(received.status(), 404);
//! ```

use crate::error::Error;
use crate::headers::Headers;
use crate::log::{debug, warning};
use crate::message::{self, ParseState, ParseStatus, Parser};
use crate::status::{UNKNOWN_REASON, reason_phrase};
use crate::tokenizer::{Config, Handler, Kind, MessageHead};
use alloc::vec::Vec;

/// An HTTP response.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Vec<u8>,
    parser: Parser,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Creates an empty response with status `0`.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty response whose parser uses `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            status: 0,
            headers: Headers::new(),
            body: Vec::new(),
            parser: Parser::new(Kind::Response, config),
        }
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    /// Sets a header; see [`Headers::set`] for how `None` behaves.
    pub fn set_header(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        self.headers.set(field, value);
        self
    }

    /// Replaces the body with a copy of `body`.
    pub fn set_body(&mut self, body: &[u8]) -> &mut Self {
        self.body.clear();
        self.body.extend_from_slice(body);
        self
    }

    /// Status code, `0` until set or parsed.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the value of header `field`, compared case-insensitively.
    pub fn header(&self, field: &str) -> Option<&str> {
        self.headers.get(field)
    }

    /// All headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// All headers, mutably.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// The body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body buffer.
    pub fn body_mut(&mut self) -> &mut Vec<u8> {
        &mut self.body
    }

    /// Where the parser is in the current message.
    pub fn parse_state(&self) -> ParseState {
        self.parser.state
    }

    /// Serializes the response.
    ///
    /// The reason phrase comes from [`reason_phrase`]; codes missing from
    /// the table render as `<unknown>`. A `Content-Length` header is added
    /// unless one is present.
    pub fn build(&self) -> Vec<u8> {
        let code = message::decimal(u64::from(self.status));
        let reason = reason_phrase(self.status).unwrap_or(UNKNOWN_REASON);
        let status_line_len = "HTTP/1.1 ".len() + code.len() + 1 + reason.len() + 2;
        let mut out =
            Vec::with_capacity(status_line_len + message::fields_len_bound(&self.headers, &self.body));

        out.extend_from_slice(b"HTTP/1.1 ");
        out.extend_from_slice(code.as_bytes());
        out.push(b' ');
        out.extend_from_slice(reason.as_bytes());
        out.extend_from_slice(b"\r\n");
        message::write_fields(&mut out, &self.headers, &self.body);

        debug!("built {} response: {} bytes", self.status, out.len());
        out
    }

    /// Feeds a received chunk to the parser.
    ///
    /// Behaves like [`Request::parse`](crate::Request::parse). Responses
    /// without `Content-Length` or chunked framing run until end of input,
    /// which is signalled by an empty `buf`.
    ///
    /// Header values that are not UTF-8 are stored with each
    /// invalid sequence replaced by U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer's protocol error, or [`Error::Unconsumed`] when
    /// the tokenizer stopped before the end of `buf`.
    pub fn parse(&mut self, buf: &[u8]) -> Result<ParseStatus, Error> {
        let Self {
            status,
            headers,
            body,
            parser,
        } = self;
        let Parser {
            tokenizer,
            state,
            field,
        } = parser;

        let mut sink = ResponseSink {
            status,
            headers,
            body,
            state,
            field,
        };
        let consumed = tokenizer.execute(&mut sink, buf)?;
        if consumed < buf.len() {
            warning!("http response parsed {} of {} bytes", consumed, buf.len());
            return Err(Error::Unconsumed {
                consumed,
                supplied: buf.len(),
            });
        }
        Ok(self.parser.status())
    }
}

struct ResponseSink<'a> {
    status: &'a mut u16,
    headers: &'a mut Headers,
    body: &'a mut Vec<u8>,
    state: &'a mut ParseState,
    field: &'a mut Vec<u8>,
}

impl Handler for ResponseSink<'_> {
    fn on_message_begin(&mut self) {
        self.headers.clear();
        self.body.clear();
        self.field.clear();
        *self.state = ParseState::InHeaders;
    }

    fn on_header_field(&mut self, field: &[u8]) {
        message::stage_field(self.field, field);
    }

    fn on_header_value(&mut self, value: &[u8]) {
        message::store_header(self.headers, self.field, value);
    }

    fn on_headers_complete(&mut self, _head: &MessageHead) {
        *self.state = ParseState::InBody;
    }

    fn on_body(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    fn on_message_complete(&mut self, head: &MessageHead) {
        *self.status = head.status;
        *self.state = ParseState::Complete;
    }
}
