use crate::error::{Error, Result};
use std::time::Duration;

/// Size of the receive buffer when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Tunables for a single exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on the bytes pulled from the stream per read.
    pub buffer_size: usize,
    /// Limit on establishing the connection. `None` blocks until the OS gives up.
    pub connect_timeout: Option<Duration>,
    /// Limit on each individual read. `None` waits for the peer indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            connect_timeout: None,
            read_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::UsageError("buffer size must be at least 1".into()));
        }
        // std rejects a zero Duration for both socket timeouts
        if self.connect_timeout == Some(Duration::ZERO) || self.read_timeout == Some(Duration::ZERO)
        {
            return Err(Error::UsageError("timeouts must be greater than zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_4k() {
        let config = ClientConfig::default();
        assert_eq!(config.buffer_size, 4096);
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.read_timeout, None);
        config.validate().unwrap();
    }

    #[test]
    fn builder_setters() {
        let config = ClientConfig::default()
            .with_buffer_size(16)
            .with_connect_timeout(Some(Duration::from_secs(3)))
            .with_read_timeout(Some(Duration::from_millis(500)));
        assert_eq!(config.buffer_size, 16);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.read_timeout, Some(Duration::from_millis(500)));
        config.validate().unwrap();
    }

    #[test]
    fn zero_values_are_usage_errors() {
        let e = ClientConfig::default().with_buffer_size(0).validate();
        assert!(matches!(e, Err(Error::UsageError(_))));

        let e = ClientConfig::default()
            .with_read_timeout(Some(Duration::ZERO))
            .validate();
        assert!(matches!(e, Err(Error::UsageError(_))));
    }
}
