//! Named local channel endpoints for log forwarding.
//!
//! A producer binds a well-known Unix domain socket; a consumer connects to
//! it whenever it wants to watch the log stream. This is the lowest layer of
//! logtap. Everything else builds on the [`IpcStream`] type provided here.

pub mod error;
pub mod stream;

#[cfg(unix)]
pub mod uds;

pub use error::{Result, TransportError};
pub use stream::IpcStream;

#[cfg(unix)]
pub use uds::{default_socket_path, LogSocket, DEFAULT_SOCKET_NAME};
