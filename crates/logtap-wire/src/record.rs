use crate::stream::{ReadStream, WriteStream};

/// Well-known severity values carried by producers.
///
/// The transport treats severity as an opaque `i32`; these constants only
/// name the conventional values so tooling can label them.
pub mod severity {
    /// Informational console output.
    pub const MESSAGE: i32 = 0;
    /// Warning output.
    pub const WARNING: i32 = 1;
    /// Failed assertion.
    pub const ASSERT: i32 = 2;
    /// Error output.
    pub const ERROR: i32 = 3;
    /// Developer log output.
    pub const LOG: i32 = 4;

    /// Human-readable name for a severity value.
    pub fn name(severity: i32) -> &'static str {
        match severity {
            MESSAGE => "MESSAGE",
            WARNING => "WARNING",
            ASSERT => "ASSERT",
            ERROR => "ERROR",
            LOG => "LOG",
            _ => "UNKNOWN",
        }
    }
}

/// One diagnostic record as emitted by the producer.
///
/// Ephemeral by design: a record exists for the duration of one send call,
/// is serialized immediately, and is not retained afterward.
///
/// Payload layout (native byte order):
/// ```text
/// i32 severity | i32 level | i32 group | u32 color | text bytes + 0x00
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity class (see [`severity`]).
    pub severity: i32,
    /// Verbosity level within the severity class.
    pub level: i32,
    /// Producer-defined category.
    pub group: i32,
    /// Packed RGBA or similar opaque color value.
    pub color: u32,
    /// The log line itself. Not parsed by this crate.
    pub text: String,
}

impl LogRecord {
    /// Create a record.
    pub fn new(
        severity: i32,
        level: i32,
        group: i32,
        color: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            level,
            group,
            color,
            text: text.into(),
        }
    }

    /// Serialize every field through a writable stream.
    pub fn encode<W: WriteStream>(&self, out: &mut W) {
        out.put_i32(self.severity)
            .put_i32(self.level)
            .put_i32(self.group)
            .put_u32(self.color)
            .put_text(&self.text);
    }

    /// Read a record back field by field. `None` when the stream is
    /// exhausted before the fixed-width fields are complete; the text field
    /// tolerates a missing terminator by consuming to end-of-data.
    pub fn decode<R: ReadStream>(src: &mut R) -> Option<Self> {
        let severity = src.get_i32()?;
        let level = src.get_i32()?;
        let group = src.get_i32()?;
        let color = src.get_u32()?;
        let text = src.get_text();
        Some(Self {
            severity,
            level,
            group,
            color,
            text,
        })
    }

    /// Serialized payload length in bytes.
    pub fn encoded_len(&self) -> usize {
        4 * std::mem::size_of::<i32>() + self.text.len() + 1
    }
}
