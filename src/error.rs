use std::convert;
use std::error;
use std::fmt;
use std::io;
use std::num;

#[derive(Debug)]
pub enum Error {
    UsageError(String),
    MalformedUrl(String),
    ConnectionFailed {
        host: String,
        port: String,
        source: io::Error,
    },
    SendFailed(io::Error),
    ReceiveFailed(io::Error),
    OutputFailed(io::Error),
}

pub type Result<R> = std::result::Result<R, Error>;

impl Error {
    /// Process exit status to report for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UsageError(_) | Error::MalformedUrl(_) => 1,
            Error::ConnectionFailed { .. } => 2,
            Error::SendFailed(_) => 3,
            Error::ReceiveFailed(_) => 4,
            Error::OutputFailed(_) => 5,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UsageError(msg) => write!(f, "usage error: {}", msg),
            Error::MalformedUrl(msg) => write!(f, "malformed url: {}", msg),
            Error::ConnectionFailed { host, port, source } => {
                write!(f, "failed to connect to {}:{}: {}", host, port, source)
            }
            Error::SendFailed(e) => write!(f, "failed to send request: {}", e),
            Error::ReceiveFailed(e) => write!(f, "failed to receive response: {}", e),
            Error::OutputFailed(e) => write!(f, "failed to write output: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::UsageError(_) => None,
            Error::MalformedUrl(_) => None,
            Error::ConnectionFailed { source, .. } => Some(source),
            Error::SendFailed(e) => Some(e),
            Error::ReceiveFailed(e) => Some(e),
            Error::OutputFailed(e) => Some(e),
        }
    }
}

impl convert::From<num::ParseIntError> for Error {
    fn from(e: num::ParseIntError) -> Self {
        Error::MalformedUrl(format!("invalid port: {}", e))
    }
}

#[cfg(test)]
mod error_tests {
    use super::Error;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn exit_codes_are_non_zero() {
        let errors = vec![
            Error::UsageError("x".into()),
            Error::MalformedUrl("x".into()),
            Error::ConnectionFailed {
                host: "h".into(),
                port: "80".into(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            },
            Error::SendFailed(io::ErrorKind::WriteZero.into()),
            Error::ReceiveFailed(io::ErrorKind::ConnectionReset.into()),
            Error::OutputFailed(io::ErrorKind::BrokenPipe.into()),
        ];
        for e in &errors {
            assert_ne!(e.exit_code(), 0, "{}", e);
        }
    }

    #[test]
    fn connection_failed_keeps_cause() {
        let e = Error::ConnectionFailed {
            host: "example.com".into(),
            port: "8080".into(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(
            e.to_string(),
            "failed to connect to example.com:8080: refused"
        );
        assert!(e.source().is_some());
    }

    #[test]
    fn parse_int_error_is_malformed_url() {
        let e: Error = "abc".parse::<u16>().unwrap_err().into();
        assert!(matches!(e, Error::MalformedUrl(_)));
    }
}
