use std::path::Path;

use logtap_transport::{IpcStream, LogSocket};
use logtap_wire::{LogRecord, RecordReader, WireConfig};

use crate::error::Result;

/// Consumer side of the channel: a live connection to a producer's endpoint,
/// yielding records until the producer goes away.
pub struct Subscription {
    reader: RecordReader<IpcStream>,
}

/// Attach to a producer's endpoint at `path`.
pub fn attach(path: impl AsRef<Path>) -> Result<Subscription> {
    attach_with_config(path, WireConfig::default())
}

/// Attach with explicit wire configuration.
pub fn attach_with_config(path: impl AsRef<Path>, config: WireConfig) -> Result<Subscription> {
    let stream = LogSocket::connect(path)?;
    let reader = RecordReader::with_config_ipc(stream, config)?;
    Ok(Subscription { reader })
}

impl Subscription {
    /// Receive the next record (blocking).
    ///
    /// Returns `Err(WireError::ConnectionClosed)` wrapped in
    /// [`ForwardError::Wire`](crate::ForwardError::Wire) once the producer
    /// disconnects or shuts down.
    pub fn next_record(&mut self) -> Result<LogRecord> {
        self.reader.read_record().map_err(Into::into)
    }
}

impl Iterator for Subscription {
    type Item = Result<LogRecord>;

    /// Yields records until the connection closes, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(record) => Some(Ok(record)),
            Err(crate::error::ForwardError::Wire(logtap_wire::WireError::ConnectionClosed)) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use logtap_wire::severity;

    use super::*;
    use crate::forwarder::Forwarder;

    fn make_sock_path(tag: &str) -> PathBuf {
        let dir = PathBuf::from(format!(
            "/tmp/logtap-sub-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir.join("log.sock")
    }

    fn wait_until(deadline: Duration, mut cond: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if cond() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn subscription_streams_records_until_producer_drops() {
        let sock_path = make_sock_path("stream");
        let forwarder = Forwarder::bind(&sock_path).expect("bind should succeed");

        let subscription = attach(&sock_path).expect("attach should succeed");
        assert!(wait_until(Duration::from_secs(3), || forwarder
            .is_connected()));

        for i in 0..3 {
            let record = LogRecord::new(severity::MESSAGE, i, 0, 0, format!("line-{i}"));
            assert!(wait_until(Duration::from_secs(3), || forwarder
                .send(&record)));
        }
        drop(forwarder);

        let received: Vec<LogRecord> = subscription
            .map(|item| item.expect("stream items should be records"))
            .collect();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0].text, "line-0");
        assert_eq!(received[2].text, "line-2");

        if let Some(parent) = sock_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn attach_fails_when_no_producer_is_listening() {
        let sock_path = make_sock_path("absent");
        let result = attach(&sock_path);
        assert!(matches!(
            result,
            Err(crate::error::ForwardError::Transport(_))
        ));

        if let Some(parent) = sock_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }
}
