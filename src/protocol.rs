//! The wire form of the single request this client sends.
use crate::url::UrlParts;
use std::fmt;
#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use std::str;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct HttpVersion {
    major: u32,
    minor: u32,
}

impl HttpVersion {
    fn new(major: u32, minor: u32) -> Self {
        HttpVersion { major, minor }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
impl str::FromStr for HttpVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::MalformedUrl(format!("bad version '{}'", s));
        let rest = s.strip_prefix("HTTP/").ok_or_else(bad)?;
        let (major, minor) = rest.split_once('.').ok_or_else(bad)?;
        if major.len() != 1 || minor.len() != 1 {
            return Err(bad());
        }
        Ok(HttpVersion::new(major.parse()?, minor.parse()?))
    }
}


#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HttpMethod {
    Get,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
struct HttpHeader {
    key: String,
    value: String,
}

impl HttpHeader {
    fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        HttpHeader {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Headers in the order they were added; `Host` must lead.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
struct HttpHeaders {
    headers: Vec<HttpHeader>,
}

impl HttpHeaders {
    fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.push(HttpHeader::new(key, value));
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_ref())
    }
}

impl fmt::Display for HttpHeaders {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for h in &self.headers {
            write!(f, "{}: {}\r\n", h.key, h.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct HttpRequest {
    method: HttpMethod,
    uri: String,
    version: HttpVersion,
    headers: HttpHeaders,
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.uri, self.version)?;
        write!(f, "{}", self.headers)?;
        write!(f, "\r\n")?;
        Ok(())
    }
}

impl HttpRequest {
    fn new<S: Into<String>>(method: HttpMethod, uri: S) -> Self {
        HttpRequest {
            method,
            uri: uri.into(),
            version: HttpVersion::new(1, 1),
            headers: HttpHeaders::default(),
        }
    }

    /// A `Connection: close` GET for the given parts. No other headers and no body.
    pub fn get(parts: &UrlParts) -> Self {
        let mut request = HttpRequest::new(HttpMethod::Get, format!("/{}", parts.path()));
        request.headers.push("Host", parts.host_header());
        request.headers.push("Connection", "close");
        request
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses CRLF-framed request text, as a server would.
    #[cfg(test)]
    pub fn deserialize(s: &str) -> Result<Self> {
        let bad = |what: &str| Error::MalformedUrl(format!("bad request: {}", what));
        let head = s
            .strip_suffix("\r\n\r\n")
            .ok_or_else(|| bad("missing blank line"))?;
        if head.contains("\r\n\r\n") || head.replace("\r\n", "").contains('\n') {
            return Err(bad("stray line terminator"));
        }
        let mut lines = head.split("\r\n");

        let first_line = lines.next().ok_or_else(|| bad("empty"))?;
        let mut tokens = first_line.split(' ');
        let method = match tokens.next() {
            Some("GET") => HttpMethod::Get,
            m => return Err(bad(&format!("method {:?}", m))),
        };
        let uri = tokens.next().ok_or_else(|| bad("missing uri"))?;
        let version = tokens
            .next()
            .ok_or_else(|| bad("missing version"))?
            .parse::<HttpVersion>()?;
        if tokens.next().is_some() {
            return Err(bad("trailing tokens in request line"));
        }

        let mut request = HttpRequest::new(method, uri);
        request.version = version;
        for line in lines {
            let (key, value) = line
                .split_once(": ")
                .ok_or_else(|| bad(&format!("header {:?}", line)))?;
            request.headers.push(key, value);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod http_request_tests {
    use super::{HttpMethod, HttpRequest};
    use crate::url::decompose;

    #[test]
    fn exact_wire_text() {
        let parts = decompose("http://example.com:8080/a/b").unwrap();
        assert_eq!(
            &HttpRequest::get(&parts).to_string(),
            "GET /a/b HTTP/1.1\r\nHost: example.com:8080\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn default_port_is_named_in_host() {
        let parts = decompose("example.com/index.html").unwrap();
        assert_eq!(
            HttpRequest::get(&parts).serialize(),
            b"GET /index.html HTTP/1.1\r\nHost: example.com:80\r\nConnection: close\r\n\r\n"
                .to_vec()
        );
    }

    #[test]
    fn empty_path_is_a_single_slash() {
        let parts = decompose("example.com/").unwrap();
        let request = HttpRequest::get(&parts);
        assert_eq!(request.uri(), "/");
        assert!(request.to_string().starts_with("GET / HTTP/1.1\r\n"));
    }

    #[test]
    fn server_sees_path_and_host() {
        for url in &[
            "example.com/index.html",
            "http://localhost:3490/d20",
            "a:1/deep/nested/path?x=1",
            "b/",
        ] {
            let parts = decompose(url).unwrap();
            let wire = HttpRequest::get(&parts).to_string();
            let parsed = HttpRequest::deserialize(&wire).unwrap();
            assert_eq!(parsed, HttpRequest::get(&parts));
            assert_eq!(parsed.method(), HttpMethod::Get);
            assert_eq!(parsed.uri(), format!("/{}", parts.path()));
            assert_eq!(parsed.get_header("host"), Some(parts.host_header().as_str()));
            assert_eq!(parsed.get_header("Connection"), Some("close"));
        }
    }

    #[test]
    fn deserialize_rejects_bare_line_feeds() {
        assert!(HttpRequest::deserialize("GET /a HTTP/1.1\nHost: a:80\n\n").is_err());
        assert!(HttpRequest::deserialize("GET /a HTTP/1.1\r\nHost: a:80\r\n").is_err());
    }
}
