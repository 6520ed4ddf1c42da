//! Streaming HTTP/1.x tokenizer.
//!
//! The tokenizer recognizes message grammar in a byte stream and reports
//! what it finds through the [`Handler`] callbacks, in this order per
//! message:
//!
//! ```text
//! on_message_begin
//! on_url                       (requests only)
//! (on_header_field on_header_value)*
//! on_headers_complete
//! on_body*
//! on_message_complete
//! ```
//!
//! Each `on_header_field` / `on_header_value` call carries one complete
//! field name or value; tokens are never split across calls, even when the
//! head arrives in many small chunks. Partial heads are buffered inside the
//! tokenizer, so every byte of a head is reported as consumed.
//!
//! Head grammar (request/status line, header lines, chunk-size lines) is
//! recognized by [`httparse`]. Body framing follows `Transfer-Encoding:
//! chunked`, then `Content-Length`; requests without either have no body,
//! and responses without either run until end of input, which is signalled
//! by calling [`Tokenizer::execute`] with an empty slice.
//!
//! # Examples
//!
//! ```rust
//! use libiot_http::tokenizer::{Handler, Kind, MessageHead, Tokenizer};
//!
//! #[derive(Default)]
//! struct Collect {
//!     fields: Vec<String>,
//!     body: Vec<u8>,
//!     status: Option<u16>,
//! }
//!
//! impl Handler for Collect {
//!     fn on_header_field(&mut self, field: &[u8]) {
//!         self.fields.push(String::from_utf8_lossy(field).into_owned());
//!     }
//!     fn on_body(&mut self, chunk: &[u8]) {
//!         self.body.extend_from_slice(chunk);
//!     }
//!     fn on_message_complete(&mut self, head: &MessageHead) {
//!         self.status = Some(head.status);
//!     }
//! }
//!
//! let mut tokenizer = Tokenizer::new(Kind::Response);
//! let mut collect = Collect::default();
//! let wire = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok";
//!
//! assert_eq!(tokenizer.execute(&mut collect, wire), Ok(wire.len()));
//! assert_eq!(collect.fields, ["Content-Length"]);
//! assert_eq!(collect.body, b"ok");
//! assert_eq!(collect.status, Some(200));
//! ```

use crate::error::Error;
use crate::log::warning;
use crate::method::Method;
use crate::status;
use alloc::vec::Vec;

mod chunked;

use chunked::ChunkedDecoder;

/// Default limit on the number of header lines in one message.
pub const DEFAULT_MAX_HEADERS: usize = 64;

/// Default limit on the size of a message head in bytes.
pub const DEFAULT_MAX_HEAD_LEN: usize = 80 * 1024;

/// Tokenizer limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Most header lines accepted in one message.
    pub max_headers: usize,
    /// Largest message head (start line and header lines) accepted, in bytes.
    pub max_head_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_headers: DEFAULT_MAX_HEADERS,
            max_head_len: DEFAULT_MAX_HEAD_LEN,
        }
    }
}

/// Which start line the tokenizer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `METHOD target HTTP/1.x`
    Request,
    /// `HTTP/1.x code reason`
    Response,
}

/// What the tokenizer recognized in the current message's start line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHead {
    /// Request method; `None` for responses.
    pub method: Option<Method>,
    /// Response status code; `0` for requests.
    pub status: u16,
    /// Minor HTTP version, `0` or `1`.
    pub version: u8,
}

/// Receives tokenizer events. Every callback defaults to doing nothing.
pub trait Handler {
    /// A new message starts.
    fn on_message_begin(&mut self) {}
    /// The request target, exactly as it appeared on the request line.
    fn on_url(&mut self, _url: &[u8]) {}
    /// One complete header field name.
    fn on_header_field(&mut self, _field: &[u8]) {}
    /// One complete header value, paired with the preceding field name.
    fn on_header_value(&mut self, _value: &[u8]) {}
    /// The head is complete; body callbacks follow.
    fn on_headers_complete(&mut self, _head: &MessageHead) {}
    /// A piece of the decoded body.
    fn on_body(&mut self, _chunk: &[u8]) {}
    /// The message is complete.
    fn on_message_complete(&mut self, _head: &MessageHead) {}
}

#[derive(Debug, Clone)]
enum Framing {
    Length(u64),
    Chunked(ChunkedDecoder),
    UntilEof,
}

#[derive(Debug, Clone)]
enum State {
    Head,
    Body(Framing),
    /// The connection switched protocols; nothing more is consumed.
    Upgraded,
    Failed(Error),
}

/// Incremental HTTP/1.x message tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    kind: Kind,
    config: Config,
    state: State,
    head: Vec<u8>,
    /// Bytes of `head` already searched for the end of the head.
    scanned: usize,
    /// Header slots handed to httparse, kept between messages.
    scratch: Vec<httparse::Header<'static>>,
    message: MessageHead,
    upgrade: bool,
}

impl Tokenizer {
    /// Creates a tokenizer with the default [`Config`].
    pub fn new(kind: Kind) -> Self {
        Self::with_config(kind, Config::default())
    }

    /// Creates a tokenizer with custom limits.
    pub fn with_config(kind: Kind, config: Config) -> Self {
        Self {
            kind,
            config,
            state: State::Head,
            head: Vec::new(),
            scanned: 0,
            scratch: Vec::new(),
            message: MessageHead::default(),
            upgrade: false,
        }
    }

    /// Which start line this tokenizer expects.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Start line of the current (or last) message.
    pub fn message(&self) -> &MessageHead {
        &self.message
    }

    /// Whether the tokenizer stopped after a protocol switch.
    pub fn is_upgraded(&self) -> bool {
        matches!(self.state, State::Upgraded)
    }

    /// Returns to the initial state, dropping any buffered head bytes and
    /// clearing a previous error.
    pub fn reset(&mut self) {
        self.state = State::Head;
        self.head.clear();
        self.scanned = 0;
        self.message = MessageHead::default();
        self.upgrade = false;
    }

    /// Feeds `data` and returns how many bytes were consumed.
    ///
    /// Consumption stops early only after a protocol switch (`CONNECT`, or
    /// `Connection: upgrade` with an `Upgrade` header). An empty `data`
    /// signals end of input.
    ///
    /// # Errors
    ///
    /// Returns the protocol error that stopped tokenizing. Once failed, the
    /// tokenizer keeps returning that error until [`reset`](Self::reset).
    pub fn execute<H: Handler>(&mut self, handler: &mut H, data: &[u8]) -> Result<usize, Error> {
        if let State::Failed(err) = self.state {
            return Err(err);
        }
        if data.is_empty() {
            return self.finish(handler).map(|()| 0);
        }

        let mut pos = 0;
        while pos < data.len() {
            let step = match self.state {
                State::Head => self.feed_head(handler, &data[pos..]),
                State::Body(_) => self.feed_body(handler, &data[pos..]),
                State::Upgraded => break,
                State::Failed(err) => Err(err),
            };
            match step {
                Ok(0) => break,
                Ok(n) => pos += n,
                Err(err) => return Err(self.fail(err)),
            }
        }
        Ok(pos)
    }

    fn fail(&mut self, err: Error) -> Error {
        warning!("http tokenizer failed: {}", err);
        self.state = State::Failed(err);
        err
    }

    fn finish<H: Handler>(&mut self, handler: &mut H) -> Result<(), Error> {
        match self.state {
            State::Head if self.head.is_empty() => Ok(()),
            State::Upgraded => Ok(()),
            State::Body(Framing::UntilEof) => {
                self.complete(handler);
                Ok(())
            }
            _ => Err(self.fail(Error::UnexpectedEof)),
        }
    }

    fn complete<H: Handler>(&mut self, handler: &mut H) {
        handler.on_message_complete(&self.message);
        self.state = if self.upgrade {
            State::Upgraded
        } else {
            State::Head
        };
    }

    fn feed_head<H: Handler>(&mut self, handler: &mut H, input: &[u8]) -> Result<usize, Error> {
        if self.head.is_empty() {
            // Blank lines between pipelined messages.
            let blank = input
                .iter()
                .take_while(|&&b| b == b'\r' || b == b'\n')
                .count();
            if blank > 0 {
                return Ok(blank);
            }
            handler.on_message_begin();
        }

        let buffered = self.head.len();
        let take = input
            .len()
            .min(self.config.max_head_len.saturating_sub(buffered));
        if take == 0 {
            return Err(Error::HeaderOverflow);
        }
        self.head.extend_from_slice(&input[..take]);

        // httparse only runs once the blank line is in; until then only the
        // new bytes, plus enough of the old ones to catch a split terminator,
        // are searched.
        let from = self.scanned.saturating_sub(3);
        self.scanned = self.head.len();
        if !ends_head(&self.head[from..]) {
            return if self.head.len() >= self.config.max_head_len {
                Err(Error::HeaderOverflow)
            } else {
                Ok(take)
            };
        }

        let mut head = core::mem::take(&mut self.head);
        let parsed = self.parse_head(handler, &head);
        let consumed = match parsed {
            Ok(Some(len)) => {
                head.clear();
                self.scanned = 0;
                Ok(len - buffered)
            }
            Ok(None) if head.len() >= self.config.max_head_len => Err(Error::HeaderOverflow),
            Ok(None) => Ok(take),
            Err(err) => Err(err),
        };
        self.head = head;
        consumed
    }

    /// Parses a buffered head. Returns the head length once complete.
    fn parse_head<H: Handler>(&mut self, handler: &mut H, buf: &[u8]) -> Result<Option<usize>, Error> {
        let mut headers = recycle(core::mem::take(&mut self.scratch));
        headers.resize(self.config.max_headers, httparse::EMPTY_HEADER);
        let parsed = self.parse_head_into(handler, buf, &mut headers);
        self.scratch = recycle(headers);
        parsed
    }

    fn parse_head_into<'b, H: Handler>(
        &mut self,
        handler: &mut H,
        buf: &'b [u8],
        headers: &mut [httparse::Header<'b>],
    ) -> Result<Option<usize>, Error> {
        let (len, message, headers) = match self.kind {
            Kind::Request => {
                let mut req = httparse::Request::new(headers);
                let len = match req.parse(buf)? {
                    httparse::Status::Complete(len) => len,
                    httparse::Status::Partial => return Ok(None),
                };
                let method: Method = req.method.unwrap_or_default().parse()?;
                handler.on_url(req.path.unwrap_or_default().as_bytes());
                let message = MessageHead {
                    method: Some(method),
                    status: 0,
                    version: req.version.unwrap_or(1),
                };
                (len, message, req.headers)
            }
            Kind::Response => {
                let mut res = httparse::Response::new(headers);
                let len = match res.parse(buf)? {
                    httparse::Status::Complete(len) => len,
                    httparse::Status::Partial => return Ok(None),
                };
                let message = MessageHead {
                    method: None,
                    status: res.code.unwrap_or_default(),
                    version: res.version.unwrap_or(1),
                };
                (len, message, res.headers)
            }
        };

        for header in headers.iter() {
            handler.on_header_field(header.name.as_bytes());
            handler.on_header_value(header.value);
        }

        let upgrade = match self.kind {
            Kind::Request => message.method == Some(Method::Connect) || wants_upgrade(headers),
            Kind::Response => message.status == 101 && wants_upgrade(headers),
        };
        let framing = match (body_framing(headers)?, self.kind) {
            _ if upgrade => Framing::Length(0),
            (_, Kind::Response) if status::is_bodyless(message.status) => Framing::Length(0),
            (Some(framing), _) => framing,
            (None, Kind::Request) => Framing::Length(0),
            (None, Kind::Response) => Framing::UntilEof,
        };

        self.message = message;
        self.upgrade = upgrade;
        handler.on_headers_complete(&self.message);
        match framing {
            Framing::Length(0) => self.complete(handler),
            framing => self.state = State::Body(framing),
        }
        Ok(Some(len))
    }

    fn feed_body<H: Handler>(&mut self, handler: &mut H, input: &[u8]) -> Result<usize, Error> {
        let (consumed, done) = match &mut self.state {
            State::Body(Framing::Length(remaining)) => {
                let n = (*remaining).min(input.len() as u64) as usize;
                handler.on_body(&input[..n]);
                *remaining -= n as u64;
                (n, *remaining == 0)
            }
            State::Body(Framing::Chunked(decoder)) => {
                decoder.decode(input, |chunk| handler.on_body(chunk))?
            }
            State::Body(Framing::UntilEof) => {
                handler.on_body(input);
                (input.len(), false)
            }
            _ => (0, false),
        };
        if done {
            self.complete(handler);
        }
        Ok(consumed)
    }
}

/// Whether `bytes` holds an empty line, which ends a head.
fn ends_head(bytes: &[u8]) -> bool {
    bytes.windows(2).any(|w| w == b"\n\n") || bytes.windows(3).any(|w| w == b"\n\r\n")
}

/// Empties `headers` and rebinds the allocation to a new buffer lifetime.
fn recycle<'a, 'b>(mut headers: Vec<httparse::Header<'a>>) -> Vec<httparse::Header<'b>> {
    headers.clear();
    headers.into_iter().map(|_| unreachable!()).collect()
}

fn header_values<'h>(
    headers: &'h [httparse::Header<'_>],
    name: &'h str,
) -> impl Iterator<Item = &'h [u8]> {
    headers
        .iter()
        .filter(move |header| header.name.eq_ignore_ascii_case(name))
        .map(|header| header.value)
}

fn has_token(value: &[u8], token: &str) -> bool {
    value
        .split(|&b| b == b',')
        .any(|part| part.trim_ascii().eq_ignore_ascii_case(token.as_bytes()))
}

fn wants_upgrade(headers: &[httparse::Header<'_>]) -> bool {
    header_values(headers, "Connection").any(|value| has_token(value, "upgrade"))
        && header_values(headers, "Upgrade").next().is_some()
}

fn body_framing(headers: &[httparse::Header<'_>]) -> Result<Option<Framing>, Error> {
    let chunked = header_values(headers, "Transfer-Encoding").any(|value| {
        value
            .rsplit(|&b| b == b',')
            .next()
            .is_some_and(|last| last.trim_ascii().eq_ignore_ascii_case(b"chunked"))
    });
    if chunked {
        return Ok(Some(Framing::Chunked(ChunkedDecoder::new())));
    }

    let mut length = None;
    for value in header_values(headers, "Content-Length") {
        let parsed = core::str::from_utf8(value.trim_ascii())
            .ok()
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u64>().ok())
            .ok_or(Error::InvalidContentLength)?;
        match length {
            Some(previous) if previous != parsed => return Err(Error::InvalidContentLength),
            _ => length = Some(parsed),
        }
    }
    Ok(length.map(Framing::Length))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ignore;

    impl Handler for Ignore {}

    #[test]
    fn test_ends_head() {
        assert!(ends_head(b"GET / HTTP/1.1\r\n\r\n"));
        assert!(ends_head(b"GET / HTTP/1.1\n\n"));
        assert!(ends_head(b"A: 1\n\r\n"));
        assert!(!ends_head(b"GET / HTTP/1.1\r\nHost: x\r\n"));
        assert!(!ends_head(b"\r\n\r"));
    }

    #[test]
    fn test_scratch_headers_reused() {
        let mut tokenizer = Tokenizer::new(Kind::Request);
        tokenizer.execute(&mut Ignore, b"GET / HTTP/1.1\r\nA: 1\r\n\r\n").unwrap();
        let capacity = tokenizer.scratch.capacity();
        assert!(capacity >= DEFAULT_MAX_HEADERS);

        tokenizer.execute(&mut Ignore, b"GET / HTTP/1.1\r\nB: 2\r\n\r\n").unwrap();
        assert_eq!(tokenizer.scratch.capacity(), capacity);
        assert!(tokenizer.scratch.is_empty());
    }
}
