//! HTTP request entity.
//!
//! A [`Request`] owns its method, [`Url`], [`Headers`] and body. It can be
//! built into wire bytes for sending, or filled incrementally from received
//! bytes with [`Request::parse`].
//!
//! # Building
//!
//! ```rust
//! use libiot_http::{Method, Request};
//!
//! let mut request = Request::new();
//! request.set_method(Method::Post).set_header("Host", Some("example.com"));
//! request.url_mut().set_path("/api/data").set_userinfo("device:secret");
//! request.url_mut().set_param("room", "living room").unwrap();
//! request.set_body(br#"{"pm2_5":12}"#);
//!
//! let wire = request.build();
//! assert!(wire.starts_with(b"POST /api/data?room=living+room HTTP/1.1\r\n"));
//! assert_eq!(request.header("authorization"), Some("Basic ZGV2aWNlOnNlY3JldA=="));
//! ```
//!
//! # Parsing
//!
//! ```rust
//! use libiot_http::{Method, ParseStatus, Request};
//!
//! let mut request = Request::new();
//! assert_eq!(request.parse(b"GET /status?verbose=1 HTTP/1.1\r\n"), Ok(ParseStatus::Partial));
//! assert_eq!(request.parse(b"Host: sensor.local\r\n\r\n"), Ok(ParseStatus::Complete));
//!
//! assert_eq!(request.method(), Some(Method::Get));
//! assert_eq!(request.url().path(), Some("/status"));
//! assert_eq!(request.url().param("verbose"), Some("1"));
//! assert_eq!(request.header("host"), Some("sensor.local"));
//! ```

use crate::error::Error;
use crate::headers::Headers;
use crate::log::{debug, warning};
use crate::message::{self, AUTHORIZATION, ParseState, ParseStatus, Parser};
use crate::method::Method;
use crate::tokenizer::{Config, Handler, Kind, MessageHead};
use crate::url::{Url, percent};
use alloc::string::String;
use alloc::vec::Vec;
use base64ct::{Base64, Encoding as _};

/// An HTTP request.
#[derive(Debug)]
pub struct Request {
    method: Option<Method>,
    url: Url,
    headers: Headers,
    body: Vec<u8>,
    parser: Parser,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Creates an empty request with default tokenizer limits.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty request whose parser uses `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            method: None,
            url: Url::new(),
            headers: Headers::new(),
            body: Vec::new(),
            parser: Parser::new(Kind::Request, config),
        }
    }

    /// Sets the method.
    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = Some(method);
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

    /// The method, if one was set or parsed.
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    /// The request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request URL, mutably.
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
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

    /// The request target: path (`/` when unset), query with percent-encoded
    /// values, and fragment.
    pub fn target(&self) -> String {
        let path = self.url.path().unwrap_or("/");
        let bound = path.len()
            + self
                .url
                .params()
                .map(|(key, value)| 2 + key.len() + value.len() * 3)
                .sum::<usize>()
            + self.url.fragment().map_or(0, |fragment| 1 + fragment.len());

        let mut target = String::with_capacity(bound);
        target.push_str(path);
        for (i, (key, value)) in self.url.params().enumerate() {
            target.push(if i == 0 { '?' } else { '&' });
            target.push_str(key);
            target.push('=');
            percent::encode_into(value, &mut target);
        }
        if let Some(fragment) = self.url.fragment() {
            target.push('#');
            target.push_str(fragment);
        }
        target
    }

    /// Serializes the request.
    ///
    /// When the URL carries userinfo, an `Authorization: Basic` header is
    /// upserted first, replacing any `Authorization` header already set.
    /// A `Content-Length` header is added unless one is present. The method
    /// defaults to `GET`.
    pub fn build(&mut self) -> Vec<u8> {
        let target = self.target();

        if let Some(userinfo) = self.url.userinfo() {
            let mut credentials = String::from("Basic ");
            credentials.push_str(&Base64::encode_string(userinfo.as_bytes()));
            self.headers.insert(AUTHORIZATION, &credentials);
        }

        let method = self.method.unwrap_or(Method::Get).as_str();
        let request_line_len = method.len() + 1 + target.len() + " HTTP/1.1\r\n".len();
        let mut out =
            Vec::with_capacity(request_line_len + message::fields_len_bound(&self.headers, &self.body));

        out.extend_from_slice(method.as_bytes());
        out.push(b' ');
        out.extend_from_slice(target.as_bytes());
        out.extend_from_slice(b" HTTP/1.1\r\n");
        message::write_fields(&mut out, &self.headers, &self.body);

        debug!("built {} request: {} bytes", method, out.len());
        out
    }

    /// Feeds a received chunk to the parser.
    ///
    /// Returns [`ParseStatus::Complete`] once a whole message has been parsed and
    /// [`ParseStatus::Partial`] while more bytes are expected. An empty `buf`
    /// signals end of input. A new message clears the headers and body, so
    /// one request can be reused for pipelined messages.
    ///
    /// Header values that are not UTF-8 are stored with each
    /// invalid sequence replaced by U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer's protocol error, or [`Error::Unconsumed`] when
    /// the tokenizer stopped before the end of `buf`. Whatever was parsed so
    /// far stays in the request.
    pub fn parse(&mut self, buf: &[u8]) -> Result<ParseStatus, Error> {
        let Self {
            method,
            url,
            headers,
            body,
            parser,
        } = self;
        let Parser {
            tokenizer,
            state,
            field,
        } = parser;

        let mut sink = RequestSink {
            method,
            url,
            headers,
            body,
            state,
            field,
        };
        let consumed = tokenizer.execute(&mut sink, buf)?;
        if consumed < buf.len() {
            warning!("http request parsed {} of {} bytes", consumed, buf.len());
            return Err(Error::Unconsumed {
                consumed,
                supplied: buf.len(),
            });
        }
        Ok(self.parser.status())
    }
}

/// Routes tokenizer callbacks into the parts of a [`Request`].
struct RequestSink<'a> {
    method: &'a mut Option<Method>,
    url: &'a mut Url,
    headers: &'a mut Headers,
    body: &'a mut Vec<u8>,
    state: &'a mut ParseState,
    field: &'a mut Vec<u8>,
}

impl Handler for RequestSink<'_> {
    fn on_message_begin(&mut self) {
        self.headers.clear();
        self.body.clear();
        self.field.clear();
        *self.state = ParseState::InHeaders;
    }

    fn on_url(&mut self, url: &[u8]) {
        let parsed = core::str::from_utf8(url)
            .map_err(|_| Error::InvalidUrl)
            .and_then(|target| self.url.parse(target));
        if parsed.is_err() {
            warning!("http request target is not a url, ignored");
        }
    }

    fn on_header_field(&mut self, field: &[u8]) {
        message::stage_field(self.field, field);
    }

    fn on_header_value(&mut self, value: &[u8]) {
        let (field, value) = message::store_header(self.headers, self.field, value);
        if !field.eq_ignore_ascii_case(AUTHORIZATION) {
            return;
        }
        let Some(credentials) = value.strip_prefix("Basic ") else {
            return;
        };
        match Base64::decode_vec(credentials.trim())
            .ok()
            .and_then(|decoded| String::from_utf8(decoded).ok())
        {
            Some(userinfo) => {
                self.url.set_userinfo(&userinfo);
            }
            None => {
                warning!("http basic credentials are not valid base64 text");
            }
        }
    }

    fn on_headers_complete(&mut self, _head: &MessageHead) {
        *self.state = ParseState::InBody;
    }

    fn on_body(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    fn on_message_complete(&mut self, head: &MessageHead) {
        *self.method = head.method;
        *self.state = ParseState::Complete;
    }
}
