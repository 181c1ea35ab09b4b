/// Errors that can occur while setting up or tearing down forwarding.
///
/// Transient connection conditions (no consumer, consumer hung up, send
/// failed) are not errors at this layer; they resolve to a dropped record
/// and a reset connection.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// Endpoint-level error.
    #[error("transport error: {0}")]
    Transport(#[from] logtap_transport::TransportError),

    /// Framing or serialization error.
    #[error("wire error: {0}")]
    Wire(#[from] logtap_wire::WireError),

    /// The acceptor thread could not be spawned.
    #[error("failed to spawn acceptor thread: {0}")]
    Spawn(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ForwardError>;
