//! HTTP request methods.
//!
//! The method table covers the methods recognized by common HTTP/1.1
//! tokenizers, including the WebDAV, CalDAV and UPnP extensions that show up
//! on embedded gateways.

#![allow(missing_docs)]

use crate::error::Error;
use core::fmt;
use core::str::FromStr;

/// An HTTP request method.
///
/// A method is a plain value; its name is a `&'static str` from the method
/// table, so requests never own a copy of it.
///
/// # Examples
///
/// ```rust
/// use libiot_http::Method;
///
/// let method: Method = "M-SEARCH".parse().unwrap();
/// assert_eq!(method, Method::MSearch);
/// assert_eq!(Method::Get.as_str(), "GET");
/// assert!("get".parse::<Method>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Delete,
    Get,
    Head,
    Post,
    Put,
    Connect,
    Options,
    Trace,
    Copy,
    Lock,
    Mkcol,
    Move,
    Propfind,
    Proppatch,
    Search,
    Unlock,
    Bind,
    Rebind,
    Unbind,
    Acl,
    Report,
    Mkactivity,
    Checkout,
    Merge,
    MSearch,
    Notify,
    Subscribe,
    Unsubscribe,
    Patch,
    Purge,
    Mkcalendar,
    Link,
    Unlink,
    Source,
}

const METHODS: [Method; 34] = [
    Method::Delete,
    Method::Get,
    Method::Head,
    Method::Post,
    Method::Put,
    Method::Connect,
    Method::Options,
    Method::Trace,
    Method::Copy,
    Method::Lock,
    Method::Mkcol,
    Method::Move,
    Method::Propfind,
    Method::Proppatch,
    Method::Search,
    Method::Unlock,
    Method::Bind,
    Method::Rebind,
    Method::Unbind,
    Method::Acl,
    Method::Report,
    Method::Mkactivity,
    Method::Checkout,
    Method::Merge,
    Method::MSearch,
    Method::Notify,
    Method::Subscribe,
    Method::Unsubscribe,
    Method::Patch,
    Method::Purge,
    Method::Mkcalendar,
    Method::Link,
    Method::Unlink,
    Method::Source,
];

impl Method {
    /// Returns the method name as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Delete => "DELETE",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Copy => "COPY",
            Method::Lock => "LOCK",
            Method::Mkcol => "MKCOL",
            Method::Move => "MOVE",
            Method::Propfind => "PROPFIND",
            Method::Proppatch => "PROPPATCH",
            Method::Search => "SEARCH",
            Method::Unlock => "UNLOCK",
            Method::Bind => "BIND",
            Method::Rebind => "REBIND",
            Method::Unbind => "UNBIND",
            Method::Acl => "ACL",
            Method::Report => "REPORT",
            Method::Mkactivity => "MKACTIVITY",
            Method::Checkout => "CHECKOUT",
            Method::Merge => "MERGE",
            Method::MSearch => "M-SEARCH",
            Method::Notify => "NOTIFY",
            Method::Subscribe => "SUBSCRIBE",
            Method::Unsubscribe => "UNSUBSCRIBE",
            Method::Patch => "PATCH",
            Method::Purge => "PURGE",
            Method::Mkcalendar => "MKCALENDAR",
            Method::Link => "LINK",
            Method::Unlink => "UNLINK",
            Method::Source => "SOURCE",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Looks the name up in the method table. Method names are
    /// case-sensitive on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        METHODS
            .iter()
            .copied()
            .find(|method| method.as_str() == s)
            .ok_or(Error::InvalidMethod)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Method {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}
