use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use logtap_transport::{IpcStream, LogSocket};
use logtap_wire::{LogRecord, RecordWriter, WireConfig, DEFAULT_MAX_PAYLOAD};
use tracing::{debug, info, warn};

/// Tuning knobs for the forwarder.
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Pause between acceptor loop iterations.
    pub accept_interval: Duration,
    /// Upper bound on one producer-side send. A consumer that cannot keep
    /// up within this window is treated as disconnected.
    pub write_timeout: Duration,
    /// Maximum serialized record size.
    pub max_payload_size: usize,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            accept_interval: Duration::from_millis(1),
            write_timeout: Duration::from_millis(100),
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// State shared between the producer-side send path and the acceptor thread.
///
/// `connected` is a best-effort hint: the producer may attempt a send on a
/// connection that just dropped, or skip one that was just established. Both
/// are accepted in exchange for a send path that never parks.
struct Shared {
    conn: Mutex<Option<RecordWriter<IpcStream>>>,
    connected: AtomicBool,
    shutdown: AtomicBool,
}

impl Shared {
    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Option<RecordWriter<IpcStream>>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn detach(&self) {
        *self.lock_conn() = None;
        self.connected.store(false, Ordering::Release);
    }
}

/// Owns one server-side channel endpoint and keeps at most one best-effort
/// consumer connection alive, without ever blocking the log-emission path.
///
/// Endpoint lifecycle: `LISTENING -> CONNECTED -> LISTENING`, with shutdown
/// terminal from any state. The listening socket lives on the acceptor
/// thread, so the socket file is cleaned up when that thread exits.
pub struct Forwarder {
    shared: Arc<Shared>,
    path: PathBuf,
    acceptor: Option<JoinHandle<()>>,
}

impl Forwarder {
    /// Bind the endpoint at `path` and start the acceptor thread.
    ///
    /// Fails if the endpoint cannot be created; a forwarder never starts
    /// half-alive.
    pub fn bind(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        Self::with_config(path, ForwarderConfig::default())
    }

    /// Bind with explicit configuration.
    pub fn with_config(
        path: impl AsRef<Path>,
        config: ForwarderConfig,
    ) -> crate::error::Result<Self> {
        let socket = LogSocket::bind(path)?;
        let path = socket.path().to_path_buf();

        let shared = Arc::new(Shared {
            conn: Mutex::new(None),
            connected: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
        });

        let acceptor = std::thread::Builder::new()
            .name("logtap-acceptor".into())
            .spawn({
                let shared = Arc::clone(&shared);
                move || accept_loop(socket, &shared, &config)
            })
            .map_err(crate::error::ForwardError::Spawn)?;

        Ok(Self {
            shared,
            path,
            acceptor: Some(acceptor),
        })
    }

    /// Best-effort hint that a consumer is currently attached.
    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::Acquire)
    }

    /// The endpoint path consumers connect to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offer one record to the attached consumer.
    ///
    /// Returns `true` if the record was handed to the channel. With no
    /// consumer attached this is a no-op returning `false`. A failed send
    /// drops the connection (the acceptor re-establishes it) and returns
    /// `false`; the record is lost on this channel only — the caller's
    /// original sink has already received it.
    pub fn send(&self, record: &LogRecord) -> bool {
        if !self.shared.connected.load(Ordering::Acquire) {
            return false;
        }

        let mut guard = self.shared.lock_conn();
        let Some(writer) = guard.as_mut() else {
            return false;
        };

        match writer.send(record) {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "send failed; detaching consumer");
                *guard = None;
                self.shared.connected.store(false, Ordering::Release);
                false
            }
        }
    }

    /// Stop the acceptor, wait for it to exit, and drop any live consumer
    /// connection. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.acceptor.take() {
            let _ = handle.join();
        }
        self.shared.detach();
    }
}

impl Drop for Forwarder {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn accept_loop(socket: LogSocket, shared: &Shared, config: &ForwarderConfig) {
    let wire_config = WireConfig {
        max_payload_size: config.max_payload_size,
        read_timeout: None,
        write_timeout: Some(config.write_timeout),
    };

    while !shared.shutdown.load(Ordering::Acquire) {
        if shared.connected.load(Ordering::Acquire) {
            let hung_up = shared
                .lock_conn()
                .as_ref()
                .map_or(true, |writer| writer.get_ref().connection_closed());
            if hung_up {
                info!("consumer detached");
                shared.detach();
            }
        } else {
            match socket.try_accept() {
                Ok(Some(stream)) => attach_consumer(shared, stream, &wire_config),
                Ok(None) => {}
                Err(err) => warn!(%err, "accept failed"),
            }
        }

        std::thread::sleep(config.accept_interval);
    }

    debug!("acceptor shutting down");
    // `socket` drops here, removing the endpoint file after the loop has
    // fully observed shutdown.
}

fn attach_consumer(shared: &Shared, stream: IpcStream, wire_config: &WireConfig) {
    if let Some((uid, gid, pid)) = stream.peer_credentials() {
        info!(uid, gid, pid, "consumer attached");
    } else {
        info!("consumer attached");
    }

    match RecordWriter::with_config_ipc(stream, wire_config.clone()) {
        Ok(writer) => {
            *shared.lock_conn() = Some(writer);
            shared.connected.store(true, Ordering::Release);
        }
        Err(err) => warn!(%err, "failed to configure consumer stream"),
    }
}
