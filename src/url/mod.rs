//! URL model.
//!
//! A [`Url`] holds the scheme, host, port, path, fragment, userinfo and an
//! ordered set of query parameters of a URL. Parameter keys are unique under
//! ASCII case-insensitive comparison and values are held percent-decoded.
//!
//! # Defaults
//!
//! Reads fall back to defaults for unset fields: [`Url::scheme`] yields
//! `"http"` and [`Url::port`] yields `80`. The port default does not look at
//! the scheme, so an `https` URL without an explicit port still reads `80`
//! until it is parsed from a string (parsing infers `443`).
//!
//! # Examples
//!
//! ```rust
//! use libiot_http::Url;
//!
//! let mut url = Url::new();
//! url.parse("http://example.com/a?x=1&y=2#frag").unwrap();
//!
//! assert_eq!(url.scheme(), "http");
//! assert_eq!(url.host(), Some("example.com"));
//! assert_eq!(url.port(), 80);
//! assert_eq!(url.path(), Some("/a"));
//! assert_eq!(url.param("X"), Some("1"));
//! assert_eq!(url.fragment(), Some("frag"));
//! assert_eq!(url.to_string(), "http://example.com/a?x=1&y=2#frag");
//! ```

use crate::error::Error;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write as _;

mod fields;
pub(crate) mod percent;

/// Port used when none is set.
pub const DEFAULT_PORT: u16 = 80;

/// Canonical port for `scheme`, compared case-insensitively.
pub fn default_port(scheme: &str) -> Option<u16> {
    if scheme.eq_ignore_ascii_case("http") {
        Some(80)
    } else if scheme.eq_ignore_ascii_case("https") {
        Some(443)
    } else {
        None
    }
}

/// A structured URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    scheme: Option<String>,
    host: Option<String>,
    port: u16,
    path: Option<String>,
    fragment: Option<String>,
    userinfo: Option<String>,
    params: Vec<(String, String)>,
}

impl Url {
    /// Creates an empty URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme.
    pub fn set_scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme = Some(String::from(scheme));
        self
    }

    /// Sets the host.
    pub fn set_host(&mut self, host: &str) -> &mut Self {
        self.host = Some(String::from(host));
        self
    }

    /// Sets the port. `0` means unset.
    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = port;
        self
    }

    /// Sets the path.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.path = Some(String::from(path));
        self
    }

    /// Sets the fragment, without the leading `#`.
    pub fn set_fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = Some(String::from(fragment));
        self
    }

    /// Sets the `user:password` pair used for Basic authentication.
    pub fn set_userinfo(&mut self, userinfo: &str) -> &mut Self {
        self.userinfo = Some(String::from(userinfo));
        self
    }

    /// Sets a query parameter, replacing the value of an existing key
    /// (compared case-insensitively) in place.
    ///
    /// `value` is the decoded value; encoding happens when a request is built.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyParam`] if `key` or `value` is empty. The URL is
    /// left unchanged.
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<&mut Self, Error> {
        if key.is_empty() || value.is_empty() {
            return Err(Error::EmptyParam);
        }
        self.upsert_param(key, value);
        Ok(self)
    }

    fn upsert_param(&mut self, key: &str, value: &str) {
        match self
            .params
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = String::from(value),
            None => self.params.push((String::from(key), String::from(value))),
        }
    }

    /// The scheme, `"http"` when unset.
    pub fn scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or("http")
    }

    /// The host, if set.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The port, [`DEFAULT_PORT`] when unset.
    pub fn port(&self) -> u16 {
        if self.port > 0 { self.port } else { DEFAULT_PORT }
    }

    /// The path, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Looks up a query parameter by case-insensitive key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Query parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The fragment, if set.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// `user:password` credentials, if set.
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Resets every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Appends `scheme://host[:port]path[?k=v&...][#fragment]` to `out` and
    /// returns the number of bytes appended.
    ///
    /// The port is written only when it is set and differs from the scheme's
    /// canonical port. Query values are written as stored, without
    /// percent-encoding.
    pub fn build(&self, out: &mut String) -> usize {
        let start = out.len();
        let scheme = self.scheme();
        out.push_str(scheme);
        out.push_str("://");
        match self.host() {
            Some(host) if host.contains(':') => {
                out.push('[');
                out.push_str(host);
                out.push(']');
            }
            host => out.push_str(host.unwrap_or("")),
        }
        if self.port > 0 && default_port(scheme) != Some(self.port) {
            let mut digits: heapless::String<5> = heapless::String::new();
            // u16::MAX has five digits.
            let _ = write!(digits, "{}", self.port);
            out.push(':');
            out.push_str(&digits);
        }
        out.push_str(self.path().unwrap_or(""));
        for (i, (key, value)) in self.params.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        if let Some(fragment) = self.fragment() {
            out.push('#');
            out.push_str(fragment);
        }
        out.len() - start
    }

    /// Parses `s` into this URL.
    ///
    /// On success the URL is cleared and rebuilt from `s`. When `s` has no
    /// explicit port, the port is inferred from an `http` or `https` scheme.
    /// The query is split on `&` and `=`; values are percent-decoded, keys are
    /// kept raw. A pair without `=` or with an empty key ends query parsing,
    /// keeping the pairs before it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `s` is not syntactically a URL; the
    /// URL is left untouched.
    pub fn parse(&mut self, s: &str) -> Result<(), Error> {
        let fields = fields::split(s)?;
        self.clear();

        let field = |range: Option<core::ops::Range<usize>>| range.map(|r| String::from(&s[r]));
        self.scheme = field(fields.scheme);
        self.host = field(fields.host);
        self.port = match (fields.port, self.scheme.as_deref()) {
            (Some(port), _) => port,
            (None, Some(scheme)) => default_port(scheme).unwrap_or(0),
            (None, None) => 0,
        };
        self.path = field(fields.path);
        if let Some(query) = fields.query {
            self.parse_query(&s[query]);
        }
        self.fragment = field(fields.fragment);
        self.userinfo = field(fields.userinfo);
        Ok(())
    }

    fn parse_query(&mut self, query: &str) {
        // A single trailing separator ends the query rather than opening an
        // empty pair.
        let query = query.strip_suffix('&').unwrap_or(query);
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                break;
            };
            if key.is_empty() {
                break;
            }
            self.upsert_param(key, &percent::decode(value));
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.build(&mut out);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests;
