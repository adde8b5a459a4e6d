//! Where response bytes go once they leave the socket.
use crate::error::{Error, Result};
use std::io;

/// Forwards each received chunk to an underlying writer, verbatim and in order.
///
/// Every chunk is flushed as soon as it is written, so a slow response shows up incrementally
/// rather than when some buffer fills.
pub struct OutputSink<W> {
    inner: W,
    bytes: u64,
    chunks: u64,
}

impl OutputSink<io::StdoutLock<'static>> {
    pub fn stdout() -> Self {
        Self::new(io::stdout().lock())
    }
}

impl<W: io::Write> OutputSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes: 0,
            chunks: 0,
        }
    }

    /// Write exactly `chunk`. Empty chunks are ignored.
    pub fn forward(&mut self, chunk: &[u8]) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.inner.write_all(chunk).map_err(Error::OutputFailed)?;
        self.inner.flush().map_err(Error::OutputFailed)?;
        self.bytes += chunk.len() as u64;
        self.chunks += 1;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    pub fn chunks_written(&self) -> u64 {
        self.chunks
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// A writer that remembers the boundaries of every `write` it was handed.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingWriter {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
}

#[cfg(test)]
impl RecordingWriter {
    pub fn concat(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

#[cfg(test)]
impl io::Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputSink, RecordingWriter};
    use crate::error::Error;
    use std::io;

    #[test]
    fn forwards_bytes_verbatim() {
        let mut sink = OutputSink::new(RecordingWriter::default());
        sink.forward(b"\x00\xffnot\r\ntext\x00").unwrap();
        assert_eq!(sink.bytes_written(), 12);
        assert_eq!(sink.chunks_written(), 1);

        let writer = sink.into_inner();
        assert_eq!(writer.writes, vec![b"\x00\xffnot\r\ntext\x00".to_vec()]);
        assert_eq!(writer.flushes, 1);
    }

    #[test]
    fn empty_chunk_is_not_written() {
        let mut sink = OutputSink::new(RecordingWriter::default());
        sink.forward(b"").unwrap();
        assert_eq!(sink.chunks_written(), 0);
        assert!(sink.into_inner().writes.is_empty());
    }

    #[test]
    fn keeps_order() {
        let mut sink = OutputSink::new(Vec::new());
        sink.forward(b"first ").unwrap();
        sink.forward(b"second").unwrap();
        assert_eq!(&sink.into_inner(), b"first second");
    }

    struct ClosedPipe;

    impl io::Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_output_failed() {
        let mut sink = OutputSink::new(ClosedPipe);
        match sink.forward(b"data") {
            Err(Error::OutputFailed(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(sink.bytes_written(), 0);
    }
}
