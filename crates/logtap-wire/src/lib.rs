//! Typed byte streams and the log record wire format.
//!
//! This is the serialization layer of logtap. A [`ByteBuffer`] is a growable,
//! seekable byte container that acts as both a readable and writable typed
//! stream; a [`LogRecord`] is serialized through it field by field, and the
//! resulting payload is wrapped in a small length-prefixed frame:
//! - A 2-byte magic number ("LT") for stream synchronization
//! - A 4-byte little-endian payload length
//!
//! No partial reads, no buffer management in user code.

pub mod buffer;
pub mod codec;
pub mod error;
pub mod reader;
pub mod record;
pub mod stream;
pub mod writer;

pub use buffer::ByteBuffer;
pub use codec::{decode_frame, encode_frame, WireConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE, MAGIC};
pub use error::{Result, WireError};
pub use reader::RecordReader;
pub use record::{severity, LogRecord};
pub use stream::{ReadStream, SeekMode, Stream, WriteStream};
pub use writer::RecordWriter;
