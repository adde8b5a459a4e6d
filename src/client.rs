//! Connecting to a host and driving the one request/response exchange over the stream.
//!
//! ```no_run
//! use http_get::client::{HttpClient, TcpConnector};
//! use http_get::config::ClientConfig;
//! use http_get::output::OutputSink;
//!
//! fn main() -> http_get::error::Result<()> {
//!     let config = ClientConfig::default();
//!     let client = HttpClient::new(TcpConnector::from_config(&config), config);
//!     client.get("http://example.com/index.html", &mut OutputSink::stdout())?;
//!     Ok(())
//! }
//! ```
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::output::OutputSink;
use crate::protocol::HttpRequest;
use crate::url::decompose;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Represents the ability to open a byte stream to `hostname:port`.
pub trait StreamConnector {
    type Stream: io::Read + io::Write;
    fn connect(&self, hostname: &str, port: &str) -> Result<Self::Stream>;
}

/// Resolves the host and connects over TCP, trying each resolved address in turn.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
        }
    }

    fn connect_one(&self, addr: &std::net::SocketAddr) -> io::Result<TcpStream> {
        let stream = match self.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        stream.set_read_timeout(self.read_timeout)?;
        Ok(stream)
    }
}

impl StreamConnector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, hostname: &str, port: &str) -> Result<TcpStream> {
        let fail = |source| Error::ConnectionFailed {
            host: hostname.into(),
            port: port.into(),
            source,
        };
        let port_number: u16 = port
            .parse()
            .map_err(|e| fail(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
        let addrs = (hostname, port_number).to_socket_addrs().map_err(fail)?;

        let mut last_error = None;
        for addr in addrs {
            tracing::debug!(%addr, "connecting");
            match self.connect_one(&addr) {
                Ok(stream) => {
                    tracing::info!(peer = %addr, "connected");
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "connect attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(fail(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("Failed to lookup {}", hostname),
            )
        })))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExchangeSummary {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub chunks: u64,
}

/// Write all of `request` to the stream, looping over partial writes, then flush.
pub fn send_request<S: io::Write + ?Sized>(stream: &mut S, mut request: &[u8]) -> Result<u64> {
    let mut sent = 0;
    while !request.is_empty() {
        match stream.write(request) {
            Ok(0) => {
                return Err(Error::SendFailed(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "stream stopped accepting the request",
                )))
            }
            Ok(n) => {
                if n < request.len() {
                    tracing::trace!(written = n, remaining = request.len() - n, "partial send");
                }
                request = &request[n..];
                sent += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::SendFailed(e)),
        }
    }
    stream.flush().map_err(Error::SendFailed)?;
    tracing::trace!(bytes = sent, "request sent");
    Ok(sent)
}

/// Read until the peer closes, handing every chunk to `sink` the moment it arrives.
///
/// On a read error whatever was already forwarded stays forwarded.
pub fn receive_response<S, W>(
    stream: &mut S,
    sink: &mut OutputSink<W>,
    buffer_size: usize,
) -> Result<ExchangeSummary>
where
    S: io::Read + ?Sized,
    W: io::Write,
{
    if buffer_size == 0 {
        return Err(Error::UsageError("buffer size must be at least 1".into()));
    }
    let mut buf = vec![0u8; buffer_size];
    let mut summary = ExchangeSummary::default();
    loop {
        let len = match stream.read(&mut buf) {
            Ok(0) => return Ok(summary),
            Ok(len) => len,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::ReceiveFailed(e)),
        };
        tracing::trace!(len, "received chunk");
        sink.forward(&buf[..len])?;
        summary.bytes_received += len as u64;
        summary.chunks += 1;
    }
}

/// Send `request`, then stream the response into `sink` until the peer closes.
pub fn exchange<S, W>(
    stream: &mut S,
    request: &[u8],
    sink: &mut OutputSink<W>,
    buffer_size: usize,
) -> Result<ExchangeSummary>
where
    S: io::Read + io::Write + ?Sized,
    W: io::Write,
{
    let bytes_sent = send_request(stream, request)?;
    let received = receive_response(stream, sink, buffer_size)?;
    Ok(ExchangeSummary {
        bytes_sent,
        ..received
    })
}

/// Issues single-shot GET requests through a connector.
pub struct HttpClient<C: StreamConnector> {
    connector: C,
    config: ClientConfig,
}

impl<C: StreamConnector> HttpClient<C> {
    pub fn new(connector: C, config: ClientConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch `url` and write the raw response to `sink`.
    ///
    /// The url is decomposed before anything touches the network. The stream lives only for the
    /// duration of this call and is closed on every return path.
    pub fn get<W: io::Write>(&self, url: &str, sink: &mut OutputSink<W>) -> Result<ExchangeSummary> {
        self.config.validate()?;
        let parts = decompose(url)?;
        let request = HttpRequest::get(&parts).serialize();

        let mut stream = self.connector.connect(parts.hostname(), parts.port())?;
        let summary = exchange(&mut stream, &request, sink, self.config.buffer_size)?;
        tracing::debug!(
            sent = summary.bytes_sent,
            received = summary.bytes_received,
            chunks = summary.chunks,
            "exchange complete"
        );
        Ok(summary)
    }
}

/// Fetch `url` over plain TCP with default settings and write the response to `sink`.
pub fn get<W: io::Write>(url: &str, sink: &mut OutputSink<W>) -> Result<ExchangeSummary> {
    let config = ClientConfig::default();
    HttpClient::new(TcpConnector::from_config(&config), config).get(url, sink)
}
