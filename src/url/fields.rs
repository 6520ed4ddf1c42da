//! Splits a URL string into field offsets without allocating.

use crate::error::Error;
use core::ops::Range;

/// Byte ranges of each URL component found in the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Fields {
    pub scheme: Option<Range<usize>>,
    pub userinfo: Option<Range<usize>>,
    pub host: Option<Range<usize>>,
    pub port: Option<u16>,
    pub path: Option<Range<usize>>,
    pub query: Option<Range<usize>>,
    pub fragment: Option<Range<usize>>,
}

fn is_host_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b'~')
}

fn is_ipv6_byte(b: u8) -> bool {
    b.is_ascii_hexdigit() || matches!(b, b':' | b'.')
}

fn is_userinfo_byte(b: u8) -> bool {
    !matches!(b, b'/' | b'?' | b'#' | b'@' | b'[' | b']')
}

/// Splits `s` into its components.
///
/// Accepts origin form (`/path?query#fragment`), the asterisk form (`*`) and
/// absolute form (`scheme://[userinfo@]host[:port][/path][?query][#fragment]`).
pub(crate) fn split(s: &str) -> Result<Fields, Error> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.iter().any(|&b| b <= b' ' || b == 0x7f) {
        return Err(Error::InvalidUrl);
    }

    let mut fields = Fields::default();

    if bytes == b"*" {
        fields.path = Some(0..1);
        return Ok(fields);
    }
    if bytes[0] == b'/' {
        split_path_query_fragment(bytes, 0, &mut fields);
        return Ok(fields);
    }

    let scheme_end = bytes
        .iter()
        .position(|b| !b.is_ascii_alphabetic())
        .ok_or(Error::InvalidUrl)?;
    if scheme_end == 0 || !bytes[scheme_end..].starts_with(b"://") {
        return Err(Error::InvalidUrl);
    }
    fields.scheme = Some(0..scheme_end);

    let authority_start = scheme_end + 3;
    let authority_end = bytes[authority_start..]
        .iter()
        .position(|b| matches!(b, b'/' | b'?' | b'#'))
        .map_or(bytes.len(), |i| authority_start + i);
    split_authority(bytes, authority_start..authority_end, &mut fields)?;

    split_path_query_fragment(bytes, authority_end, &mut fields);
    Ok(fields)
}

fn split_authority(bytes: &[u8], authority: Range<usize>, fields: &mut Fields) -> Result<(), Error> {
    let mut host_start = authority.start;
    let ats = bytes[authority.clone()].iter().filter(|&&b| b == b'@').count();
    match ats {
        0 => {}
        1 => {
            let at = authority.start
                + bytes[authority.clone()]
                    .iter()
                    .position(|&b| b == b'@')
                    .ok_or(Error::InvalidUrl)?;
            if !bytes[authority.start..at].iter().all(|&b| is_userinfo_byte(b)) {
                return Err(Error::InvalidUrl);
            }
            fields.userinfo = Some(authority.start..at);
            host_start = at + 1;
        }
        _ => return Err(Error::InvalidUrl),
    }

    let host_and_port = &bytes[host_start..authority.end];
    let (host, port) = if host_and_port.first() == Some(&b'[') {
        let close = host_and_port
            .iter()
            .position(|&b| b == b']')
            .ok_or(Error::InvalidUrl)?;
        let literal = &host_and_port[1..close];
        if literal.is_empty() || !literal.iter().all(|&b| is_ipv6_byte(b)) {
            return Err(Error::InvalidUrl);
        }
        let rest = &host_and_port[close + 1..];
        let port = match rest.split_first() {
            None => None,
            Some((b':', digits)) => Some(digits),
            Some(_) => return Err(Error::InvalidUrl),
        };
        (host_start + 1..host_start + close, port)
    } else {
        let colon = host_and_port.iter().position(|&b| b == b':');
        let host_len = colon.unwrap_or(host_and_port.len());
        let host = &host_and_port[..host_len];
        if host.is_empty() || !host.iter().all(|&b| is_host_byte(b)) {
            return Err(Error::InvalidUrl);
        }
        let port = colon.map(|c| &host_and_port[c + 1..]);
        (host_start..host_start + host_len, port)
    };

    fields.host = Some(host);
    if let Some(digits) = port {
        fields.port = Some(parse_port(digits)?);
    }
    Ok(())
}

fn parse_port(digits: &[u8]) -> Result<u16, Error> {
    if digits.is_empty() || digits.len() > 5 || !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidUrl);
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
    u16::try_from(value).map_err(|_| Error::InvalidUrl)
}

fn split_path_query_fragment(bytes: &[u8], start: usize, fields: &mut Fields) {
    let fragment_start = bytes[start..]
        .iter()
        .position(|&b| b == b'#')
        .map(|i| start + i);
    let end = fragment_start.unwrap_or(bytes.len());
    let query_start = bytes[start..end]
        .iter()
        .position(|&b| b == b'?')
        .map(|i| start + i);
    let path_end = query_start.unwrap_or(end);

    if path_end > start {
        fields.path = Some(start..path_end);
    }
    if let Some(q) = query_start {
        fields.query = Some(q + 1..end);
    }
    if let Some(f) = fragment_start {
        fields.fragment = Some(f + 1..bytes.len());
    }
}
