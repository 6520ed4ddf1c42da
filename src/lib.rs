//! # libiot-http - HTTP/1.x message codec for IoT devices
//!
//! A small HTTP/1.x codec for devices that talk to cloud services over
//! plain byte streams. It builds request and response messages into wire
//! bytes and parses received bytes back into structured messages, chunk by
//! chunk, without owning any socket. The crate is `no_std` and needs only
//! `alloc`.
//!
//! ## Features
//!
//! - **URL model**: scheme, host, port, path, fragment, userinfo and ordered
//!   case-insensitive query parameters, with parsing and serialization
//! - **Headers**: ordered, case-insensitive collection with upsert semantics
//! - **Requests and responses**: builders with automatic `Content-Length`
//!   and `Authorization: Basic` from URL userinfo
//! - **Streaming parser**: feed arbitrarily split input; chunked and
//!   length-delimited bodies, pipelined messages and end-of-input framing
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libiot-http = "0.1.0"
//! ```
//!
//! ### Building a request
//!
//! ```rust
//! use libiot_http::{Method, Request};
//!
//! let mut request = Request::new();
//! request
//!     .set_method(Method::Get)
//!     .set_header("Host", Some("sensor.local"));
//! request.url_mut().set_path("/v1/readings");
//!
//! assert_eq!(
//!     request.build(),
//!     b"GET /v1/readings HTTP/1.1\r\nHost:sensor.local\r\nContent-Length:0\r\n\r\n"
//! );
//! ```
//!
//! ### Parsing a response in pieces
//!
//! ```rust
//! use libiot_http::{ParseStatus, Response};
//!
//! let mut response = Response::new();
//! assert_eq!(response.parse(b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhel"), Ok(ParseStatus::Partial));
//! assert_eq!(response.parse(b"lo\r\n0\r\n\r\n"), Ok(ParseStatus::Complete));
//!
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), b"hello");
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Implement `std::error::Error` for [`Error`] (default: disabled)
//! - `defmt`: Emit diagnostics and implement `defmt::Format` for public types
//! - `log`: Emit diagnostics through the `log` facade

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate alloc;

mod log;

pub mod error;

pub mod method;

pub mod status;

pub mod headers;

pub mod url;

pub mod tokenizer;

mod message;

pub mod request;

pub mod response;

pub use error::Error;
pub use headers::{Header, Headers};
pub use message::{ParseState, ParseStatus};
pub use method::Method;
pub use request::Request;
pub use response::Response;
pub use tokenizer::Config;
pub use url::Url;
