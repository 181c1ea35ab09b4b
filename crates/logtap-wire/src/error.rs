/// Errors that can occur during record framing and transfer.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The frame header contains an invalid magic number.
    #[error("invalid frame magic (expected 0x4C54 \"LT\")")]
    InvalidMagic,

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A frame payload ended before all record fields could be decoded.
    #[error("truncated record payload")]
    TruncatedRecord,

    /// An I/O error occurred while reading or writing frames.
    #[error("wire I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was transferred.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, WireError>;
