use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use logtap_transport::IpcStream;
use tracing::trace;

use crate::buffer::ByteBuffer;
use crate::codec::{decode_frame, WireConfig};
use crate::error::{Result, WireError};
use crate::record::LogRecord;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete records from any `Read` stream.
///
/// Handles partial reads internally — callers always get whole records.
pub struct RecordReader<T> {
    inner: T,
    buf: BytesMut,
    config: WireConfig,
}

impl<T: Read> RecordReader<T> {
    /// Create a new record reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, WireConfig::default())
    }

    /// Create a new record reader with explicit configuration.
    pub fn with_config(inner: T, config: WireConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete record (blocking).
    ///
    /// Returns `Err(WireError::ConnectionClosed)` when EOF is reached.
    pub fn read_record(&mut self) -> Result<LogRecord> {
        loop {
            if let Some(payload) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                trace!(len = payload.len(), "decoded record frame");
                let mut stream = ByteBuffer::from_slice(payload.as_ref());
                return LogRecord::decode(&mut stream).ok_or(WireError::TruncatedRecord);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            };

            if read == 0 {
                return Err(WireError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current reader configuration.
    pub fn config(&self) -> &WireConfig {
        &self.config
    }
}

impl RecordReader<IpcStream> {
    /// Create a record reader for `IpcStream` and apply the read timeout
    /// from config.
    pub fn with_config_ipc(inner: IpcStream, config: WireConfig) -> Result<Self> {
        inner
            .set_read_timeout(config.read_timeout)
            .map_err(|err| WireError::Io(std::io::Error::other(err.to_string())))?;
        Ok(Self::with_config(inner, config))
    }
}
