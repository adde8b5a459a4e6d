//! Splitting of a raw `[scheme://]host[:port]/path` string into its parts.
//!
//! This is deliberately not a general URL parser. There is no percent-decoding, IPv6 bracket
//! handling, or query/fragment splitting; anything after the first `/` is passed through as the
//! path verbatim.
use crate::error::{Error, Result};
use std::fmt;
use std::str;

pub const DEFAULT_PORT: &str = "80";

const SCHEME_SEPARATOR: &str = "://";

#[derive(PartialEq, Debug, Clone)]
pub enum Scheme {
    Http,
    Https,
    Other(String),
}

impl str::FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_lowercase().as_ref() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            s => Scheme::Other(s.into()),
        })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
            Scheme::Other(s) => write!(f, "{}", s),
        }
    }
}

/// The three pieces of a URL needed to issue a request.
///
/// `path` never carries the leading `/`; the request builder puts exactly one back.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct UrlParts {
    hostname: String,
    port: String,
    path: String,
}

impl UrlParts {
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value for the `Host` header, always with an explicit port.
    pub fn host_header(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

impl str::FromStr for UrlParts {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decompose(s)
    }
}

impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}/{}", self.hostname, self.port, self.path)
    }
}

/// Strips a leading `<letters>://` if there is one.
fn split_scheme(url: &str) -> Result<(Option<Scheme>, &str)> {
    match url.find(SCHEME_SEPARATOR) {
        Some(i) if i > 0 && url[..i].bytes().all(|b| b.is_ascii_alphabetic()) => {
            let scheme = url[..i].parse::<Scheme>()?;
            Ok((Some(scheme), &url[(i + SCHEME_SEPARATOR.len())..]))
        }
        _ => Ok((None, url)),
    }
}

fn validate_port(port: &str) -> Result<()> {
    if port.is_empty() {
        return Err(Error::MalformedUrl("empty port".into()));
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedUrl(format!("port '{}' is not numeric", port)));
    }
    port.parse::<u16>()?;
    Ok(())
}

/// Decompose `url` into hostname, port and path.
///
/// Fails with `MalformedUrl` when there is no `/` after the host, when the hostname is empty, or
/// when the port is not a number in `0..=65535`.
pub fn decompose(url: &str) -> Result<UrlParts> {
    let (scheme, rest) = split_scheme(url)?;
    match scheme {
        None | Some(Scheme::Http) => {}
        Some(other) => {
            tracing::warn!(scheme = %other, "only plain http is spoken; scheme ignored");
        }
    }

    let slash = rest
        .find('/')
        .ok_or_else(|| Error::MalformedUrl(format!("expected '/' after host in '{}'", url)))?;
    let host_spec = &rest[..slash];
    let path = &rest[(slash + 1)..];

    let (hostname, port) = match host_spec.find(':') {
        Some(colon) => (&host_spec[..colon], &host_spec[(colon + 1)..]),
        None => (host_spec, DEFAULT_PORT),
    };

    if hostname.is_empty() {
        return Err(Error::MalformedUrl(format!("empty hostname in '{}'", url)));
    }
    validate_port(port)?;

    let parts = UrlParts {
        hostname: hostname.into(),
        port: port.into(),
        path: path.into(),
    };
    tracing::debug!(
        hostname = parts.hostname(),
        port = parts.port(),
        path = parts.path(),
        "decomposed url"
    );
    Ok(parts)
}
