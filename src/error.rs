//! Common error type for URL and HTTP message operations

use core::fmt;

/// A common error type for URL and HTTP message operations.
///
/// This enum defines the errors that can occur while building or parsing
/// URLs and HTTP messages. It is `Copy` and allocation-free so it stays
/// portable to `no_std` targets.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The string is not syntactically a URL.
    InvalidUrl,
    /// A query parameter was set with an empty key or value.
    EmptyParam,
    /// The request method is not in the method table.
    InvalidMethod,
    /// An invalid byte was found in a token (method, request target).
    InvalidToken,
    /// An invalid byte was found in a header name.
    InvalidHeaderName,
    /// An invalid byte was found in a header value.
    InvalidHeaderValue,
    /// The HTTP version is not `HTTP/1.0` or `HTTP/1.1`.
    InvalidVersion,
    /// The status code is not three digits.
    InvalidStatus,
    /// A line ending was malformed.
    NewLine,
    /// The message has more headers than the configured limit.
    TooManyHeaders,
    /// The message head is larger than the configured limit.
    HeaderOverflow,
    /// `Content-Length` is not a number, or conflicts with another one.
    InvalidContentLength,
    /// A chunk size line in a chunked body is malformed.
    InvalidChunkSize,
    /// The input ended in the middle of a message.
    UnexpectedEof,
    /// The tokenizer stopped before consuming the whole chunk.
    Unconsumed {
        /// Bytes the tokenizer accepted.
        consumed: usize,
        /// Bytes supplied by the caller.
        supplied: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUrl => f.write_str("invalid url"),
            Error::EmptyParam => f.write_str("empty query parameter key or value"),
            Error::InvalidMethod => f.write_str("invalid method"),
            Error::InvalidToken => f.write_str("invalid token"),
            Error::InvalidHeaderName => f.write_str("invalid header name"),
            Error::InvalidHeaderValue => f.write_str("invalid header value"),
            Error::InvalidVersion => f.write_str("invalid http version"),
            Error::InvalidStatus => f.write_str("invalid status code"),
            Error::NewLine => f.write_str("invalid line ending"),
            Error::TooManyHeaders => f.write_str("too many headers"),
            Error::HeaderOverflow => f.write_str("message head too large"),
            Error::InvalidContentLength => f.write_str("invalid content-length"),
            Error::InvalidChunkSize => f.write_str("invalid chunk size"),
            Error::UnexpectedEof => f.write_str("unexpected end of input"),
            Error::Unconsumed { consumed, supplied } => {
                write!(f, "parsed {consumed} of {supplied} bytes")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<httparse::Error> for Error {
    fn from(err: httparse::Error) -> Self {
        match err {
            httparse::Error::HeaderName => Error::InvalidHeaderName,
            httparse::Error::HeaderValue => Error::InvalidHeaderValue,
            httparse::Error::NewLine => Error::NewLine,
            httparse::Error::Status => Error::InvalidStatus,
            httparse::Error::Token => Error::InvalidToken,
            httparse::Error::TooManyHeaders => Error::TooManyHeaders,
            httparse::Error::Version => Error::InvalidVersion,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidUrl => defmt::write!(f, "InvalidUrl"),
            Error::EmptyParam => defmt::write!(f, "EmptyParam"),
            Error::InvalidMethod => defmt::write!(f, "InvalidMethod"),
            Error::InvalidToken => defmt::write!(f, "InvalidToken"),
            Error::InvalidHeaderName => defmt::write!(f, "InvalidHeaderName"),
            Error::InvalidHeaderValue => defmt::write!(f, "InvalidHeaderValue"),
            Error::InvalidVersion => defmt::write!(f, "InvalidVersion"),
            Error::InvalidStatus => defmt::write!(f, "InvalidStatus"),
            Error::NewLine => defmt::write!(f, "NewLine"),
            Error::TooManyHeaders => defmt::write!(f, "TooManyHeaders"),
            Error::HeaderOverflow => defmt::write!(f, "HeaderOverflow"),
            Error::InvalidContentLength => defmt::write!(f, "InvalidContentLength"),
            Error::InvalidChunkSize => defmt::write!(f, "InvalidChunkSize"),
            Error::UnexpectedEof => defmt::write!(f, "UnexpectedEof"),
            Error::Unconsumed { consumed, supplied } => {
                defmt::write!(f, "Unconsumed({=usize}/{=usize})", *consumed, *supplied)
            }
        }
    }
}
