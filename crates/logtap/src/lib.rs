//! Forward diagnostic log records to an attachable consumer.
//!
//! A producer process wraps its log sink in a [`forward::ForwardingSink`];
//! whenever a consumer attaches to the well-known endpoint, every record is
//! additionally framed and pushed over the channel. The producer never
//! blocks on an absent, slow, or departed consumer.
//!
//! # Crate Structure
//!
//! - [`transport`] — Named channel endpoints (Unix domain sockets)
//! - [`wire`] — Typed byte streams, growable buffers, record framing
//! - [`forward`] — Connection management and the log-sink tap

/// Re-export transport types.
pub mod transport {
    pub use logtap_transport::*;
}

/// Re-export wire types.
pub mod wire {
    pub use logtap_wire::*;
}

/// Re-export forwarding types.
pub mod forward {
    pub use logtap_forward::*;
}
