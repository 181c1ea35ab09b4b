use logtap_wire::LogRecord;

use crate::forwarder::Forwarder;

/// Destination for log records on the host side.
///
/// The host's existing log path implements this (a function pointer or
/// closure is enough); [`ForwardingSink`] wraps it to add the channel.
pub trait LogSink: Send + Sync {
    /// Deliver one record.
    fn emit(&self, record: &LogRecord);
}

impl<F> LogSink for F
where
    F: Fn(&LogRecord) + Send + Sync,
{
    fn emit(&self, record: &LogRecord) {
        self(record)
    }
}

/// Interposes on a host's log sink: every record is delivered to the
/// original sink unconditionally, and additionally offered to an attached
/// consumer over the channel.
pub struct ForwardingSink<S> {
    inner: S,
    forwarder: Forwarder,
}

impl<S: LogSink> ForwardingSink<S> {
    /// Wrap `inner`, forwarding a copy of each record through `forwarder`.
    pub fn new(inner: S, forwarder: Forwarder) -> Self {
        Self { inner, forwarder }
    }

    /// The forwarder backing this sink.
    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }

    /// Unwrap into the original sink and the forwarder, e.g. to restore the
    /// host's log path at shutdown.
    pub fn into_parts(self) -> (S, Forwarder) {
        (self.inner, self.forwarder)
    }
}

impl<S: LogSink> LogSink for ForwardingSink<S> {
    fn emit(&self, record: &LogRecord) {
        // Forwarding is best-effort; the original sink always gets the record.
        let _ = self.forwarder.send(record);
        self.inner.emit(record);
    }
}
