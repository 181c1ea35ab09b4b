//! Non-blocking log record forwarding over a named local channel.
//!
//! This is the "just works" layer. A producer binds a [`Forwarder`] once at
//! startup; its acceptor thread keeps at most one consumer attached, and
//! [`Forwarder::send`] either hands a record to that consumer or drops it,
//! never stalling the thread that emitted the log line.

pub mod consumer;
pub mod error;
pub mod forwarder;
pub mod sink;

pub use consumer::{attach, attach_with_config, Subscription};
pub use error::{ForwardError, Result};
pub use forwarder::{Forwarder, ForwarderConfig};
pub use sink::{ForwardingSink, LogSink};
