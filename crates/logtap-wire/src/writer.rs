use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use logtap_transport::IpcStream;

use crate::buffer::ByteBuffer;
use crate::codec::{encode_frame, WireConfig};
use crate::error::{Result, WireError};
use crate::record::LogRecord;
use crate::stream::Stream;

const INITIAL_BUFFER_CAPACITY: usize = 512;

/// Serializes records and writes complete frames to any `Write` stream.
///
/// A write that would block is an error, not a retry: the producer path must
/// stay bounded, so a stalled consumer is treated as disconnected and the
/// record is dropped upstream.
pub struct RecordWriter<T> {
    inner: T,
    scratch: ByteBuffer,
    frame: BytesMut,
    config: WireConfig,
}

impl<T: Write> RecordWriter<T> {
    /// Create a new record writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, WireConfig::default())
    }

    /// Create a new record writer with explicit configuration.
    pub fn with_config(inner: T, config: WireConfig) -> Self {
        let mut scratch = ByteBuffer::new();
        scratch.reserve(INITIAL_BUFFER_CAPACITY);
        Self {
            inner,
            scratch,
            frame: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Serialize one record and send it as a single frame (bounded).
    pub fn send(&mut self, record: &LogRecord) -> Result<()> {
        self.scratch.clear();
        record.encode(&mut self.scratch);
        debug_assert_eq!(self.scratch.size() as usize, record.encoded_len());

        self.frame.clear();
        encode_frame(
            self.scratch.as_slice(),
            &mut self.frame,
            self.config.max_payload_size,
        )?;

        let mut offset = 0usize;
        while offset < self.frame.len() {
            match self.inner.write(&self.frame[offset..]) {
                Ok(0) => return Err(WireError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current writer configuration.
    pub fn config(&self) -> &WireConfig {
        &self.config
    }
}

impl RecordWriter<IpcStream> {
    /// Create a record writer for `IpcStream` and apply the write timeout
    /// from config, bounding every producer-side send.
    pub fn with_config_ipc(inner: IpcStream, config: WireConfig) -> Result<Self> {
        inner
            .set_write_timeout(config.write_timeout)
            .map_err(transport_to_wire_error)?;
        Ok(Self::with_config(inner, config))
    }
}

fn transport_to_wire_error(err: logtap_transport::TransportError) -> WireError {
    match err {
        logtap_transport::TransportError::Io(io)
        | logtap_transport::TransportError::Accept(io) => WireError::Io(io),
        logtap_transport::TransportError::Bind { source, .. }
        | logtap_transport::TransportError::Connect { source, .. } => WireError::Io(source),
        other => WireError::Io(std::io::Error::other(other.to_string())),
    }
}
