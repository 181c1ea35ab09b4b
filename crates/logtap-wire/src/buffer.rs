use crate::stream::{ReadStream, SeekMode, Stream, WriteStream};

/// A growable, seekable byte container that is both a readable and writable
/// typed stream, backed by a single contiguous allocation.
///
/// Logical `size` and backing `capacity` are tracked independently, so
/// repeated appends amortize reallocation the way a growable array does. A
/// single cursor serves both reads and writes; callers alternating direction
/// at different positions seek explicitly.
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    data: Vec<u8>,
    offset: usize,
    end_of_data: bool,
}

impl ByteBuffer {
    /// Create an empty buffer. It reports end-of-data until content arrives
    /// and the cursor is positioned, matching an empty stream's behavior.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            offset: 0,
            end_of_data: true,
        }
    }

    /// Create a zero-filled buffer of the given logical size.
    pub fn with_size(size: usize) -> Self {
        let mut buffer = Self::new();
        buffer.resize(size);
        buffer
    }

    /// Create a buffer holding a copy of `data`. The source is never
    /// referenced after this call.
    pub fn from_slice(data: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.assign(data);
        buffer
    }

    /// Backing allocation length. Independent of [`size`](Stream::size).
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Grow the backing allocation to at least `capacity` without changing
    /// the logical size. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        self.data
            .reserve(capacity.saturating_sub(self.data.len()));
    }

    /// Set the logical size. Growth zero-initializes the newly exposed
    /// bytes; shrinking keeps the allocation.
    pub fn resize(&mut self, size: usize) {
        self.data.resize(size, 0);
    }

    /// Reallocate the backing storage down to exactly the logical size.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Replace all content with a copy of `data`, rewind the cursor, and
    /// clear the exhaustion flag.
    pub fn assign(&mut self, data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(data);
        self.offset = 0;
        self.end_of_data = false;
    }

    /// Empty the content and rewind; the capacity is unaffected.
    pub fn clear(&mut self) {
        self.data.clear();
        self.offset = 0;
        self.end_of_data = false;
    }

    /// Borrow the content for zero-copy handoff to an I/O call. Growth may
    /// relocate storage, so the borrow must not outlive the next mutation —
    /// which the borrow checker enforces.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the content.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for ByteBuffer {
    fn tell(&self) -> u64 {
        self.offset as u64
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn end_of_data(&self) -> bool {
        self.end_of_data
    }

    fn seek(&mut self, position: i64, mode: SeekMode) -> u64 {
        let target = match mode {
            SeekMode::Start => position,
            SeekMode::Current => (self.offset as i64).saturating_add(position),
            SeekMode::End => (self.data.len() as i64).saturating_add(position),
        };
        self.offset = target.max(0) as usize;
        self.end_of_data = false;
        self.offset as u64
    }
}

impl ReadStream for ByteBuffer {
    fn read(&mut self, dst: &mut [u8]) -> usize {
        if dst.is_empty() {
            return 0;
        }
        if self.offset >= self.data.len() {
            self.end_of_data = true;
            return 0;
        }

        let available = self.data.len() - self.offset;
        let clamped = available.min(dst.len());
        dst[..clamped].copy_from_slice(&self.data[self.offset..self.offset + clamped]);
        self.offset += clamped;
        if clamped < dst.len() {
            self.end_of_data = true;
        }
        clamped
    }
}

impl WriteStream for ByteBuffer {
    fn write(&mut self, src: &[u8]) -> usize {
        if src.is_empty() {
            return 0;
        }
        let end = self.offset + src.len();
        if self.data.len() < end {
            self.resize(end);
        }
        self.data[self.offset..end].copy_from_slice(src);
        self.offset = end;
        src.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_at_tail_grows_size_and_reads_back() {
        let mut buf = ByteBuffer::from_slice(b"abc");
        buf.seek(0, SeekMode::End);

        let old_size = buf.size();
        assert_eq!(buf.write(b"defg"), 4);
        assert_eq!(buf.size(), old_size + 4);

        buf.seek(old_size as i64, SeekMode::Start);
        let mut back = [0u8; 4];
        assert_eq!(buf.read(&mut back), 4);
        assert_eq!(&back, b"defg");
    }

    #[test]
    fn seek_clamps_negative_targets_to_zero() {
        let mut buf = ByteBuffer::from_slice(b"0123456789");

        assert_eq!(buf.seek(-5, SeekMode::Start), 0);
        buf.seek(3, SeekMode::Start);
        assert_eq!(buf.seek(-100, SeekMode::Current), 0);
        assert_eq!(buf.seek(-100, SeekMode::End), 0);
        assert_eq!(buf.tell(), 0);
    }

    #[test]
    fn relative_seek_saturates_at_extreme_offsets() {
        let mut buf = ByteBuffer::from_slice(b"abc");

        buf.seek(i64::MAX, SeekMode::Start);
        assert_eq!(buf.seek(1, SeekMode::Current), i64::MAX as u64);

        assert_eq!(buf.seek(i64::MIN, SeekMode::Current), 0);
        assert_eq!(buf.seek(i64::MIN, SeekMode::End), 0);
    }

    #[test]
    fn seek_past_size_succeeds_then_read_reports_exhaustion() {
        let mut buf = ByteBuffer::from_slice(b"abc");

        let pos = buf.seek(10, SeekMode::Start);
        assert_eq!(pos, 10);
        assert!(!buf.end_of_data(), "seek itself never sets the flag");

        let mut dst = [0u8; 1];
        assert_eq!(buf.read(&mut dst), 0);
        assert!(buf.end_of_data());
        assert!(!buf.is_valid());

        // Seeking back clears the sticky flag.
        buf.seek(0, SeekMode::Start);
        assert!(buf.is_valid());
    }

    #[test]
    fn short_read_sets_exhaustion_and_returns_partial() {
        let mut buf = ByteBuffer::from_slice(b"ab");
        let mut dst = [0u8; 4];

        assert_eq!(buf.read(&mut dst), 2);
        assert_eq!(&dst[..2], b"ab");
        assert!(buf.end_of_data());
    }

    #[test]
    fn resize_to_zero_then_write_from_start() {
        let mut buf = ByteBuffer::from_slice(b"previous content");
        buf.resize(0);
        buf.seek(0, SeekMode::Start);

        assert_eq!(buf.write(b"fresh"), 5);
        assert_eq!(buf.size(), 5);
        assert_eq!(buf.as_slice(), b"fresh");
    }

    #[test]
    fn resize_growth_zero_initializes() {
        let mut buf = ByteBuffer::from_slice(b"xy");
        buf.resize(6);
        assert_eq!(buf.as_slice(), &[b'x', b'y', 0, 0, 0, 0]);
    }

    #[test]
    fn write_past_end_zero_fills_the_gap() {
        let mut buf = ByteBuffer::from_slice(b"ab");
        buf.seek(4, SeekMode::Start);
        buf.write(b"z");

        assert_eq!(buf.size(), 5);
        assert_eq!(buf.as_slice(), &[b'a', b'b', 0, 0, b'z']);
    }

    #[test]
    fn assign_then_clear_resets_everything_but_capacity() {
        let mut buf = ByteBuffer::new();
        buf.assign(&[7u8; 10]);
        assert_eq!(buf.size(), 10);

        let capacity = buf.capacity();
        buf.clear();
        assert_eq!(buf.size(), 0);
        assert_eq!(buf.tell(), 0);
        assert!(!buf.end_of_data());
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn reserve_changes_capacity_not_size() {
        let mut buf = ByteBuffer::new();
        buf.reserve(512);
        assert!(buf.capacity() >= 512);
        assert_eq!(buf.size(), 0);

        // Reserve never shrinks.
        buf.reserve(16);
        assert!(buf.capacity() >= 512);
    }

    #[test]
    fn shrink_to_fit_drops_spare_capacity() {
        let mut buf = ByteBuffer::new();
        buf.reserve(512);
        buf.write(b"abc");
        buf.shrink_to_fit();
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.size(), 3);
    }

    #[test]
    fn typed_values_round_trip() {
        let mut buf = ByteBuffer::new();
        buf.put_bool(true)
            .put_i16(-2)
            .put_u32(0xDEAD_BEEF)
            .put_i64(-1234567890123)
            .put_f64(2.5);

        buf.seek(0, SeekMode::Start);
        assert_eq!(buf.get_bool(), Some(true));
        assert_eq!(buf.get_i16(), Some(-2));
        assert_eq!(buf.get_u32(), Some(0xDEAD_BEEF));
        assert_eq!(buf.get_i64(), Some(-1234567890123));
        assert_eq!(buf.get_f64(), Some(2.5));
    }

    #[test]
    fn typed_read_on_short_data_returns_none_and_sets_flag() {
        let mut buf = ByteBuffer::from_slice(&[1, 2]);
        assert_eq!(buf.get_u32(), None);
        assert!(buf.end_of_data());
    }

    #[test]
    fn text_round_trip_stops_at_terminator() {
        let mut buf = ByteBuffer::new();
        buf.put_text("hello").put_text("world");

        buf.seek(0, SeekMode::Start);
        assert_eq!(buf.get_text(), "hello");
        assert_eq!(buf.get_text(), "world");
        assert!(!buf.end_of_data());
    }

    #[test]
    fn unterminated_text_consumes_buffer_and_signals_end_of_data() {
        let mut buf = ByteBuffer::from_slice(b"no terminator here");
        assert_eq!(buf.get_text(), "no terminator here");
        assert!(buf.end_of_data());
        assert_eq!(buf.tell(), buf.size());
    }

    #[test]
    fn wide_text_round_trip() {
        let mut buf = ByteBuffer::new();
        buf.put_wide_text("wide");

        buf.seek(0, SeekMode::Start);
        assert_eq!(buf.get_wide_text(), "wide");
    }

    #[test]
    fn bounded_text_extraction_includes_terminator() {
        let mut buf = ByteBuffer::new();
        buf.put_text("hi");
        buf.seek(0, SeekMode::Start);

        let mut dst = [0xFFu8; 8];
        let written = buf.get_text_into(&mut dst);
        assert_eq!(written, 3);
        assert_eq!(&dst[..3], &[b'h', b'i', 0]);
    }

    #[test]
    fn bounded_text_extraction_stops_at_capacity() {
        let mut buf = ByteBuffer::new();
        buf.put_text("overflowing");
        buf.seek(0, SeekMode::Start);

        let mut dst = [0u8; 4];
        let written = buf.get_text_into(&mut dst);
        assert_eq!(written, 4);
        assert_eq!(&dst, b"over");
    }

    #[test]
    fn new_buffer_reports_end_of_data_until_positioned() {
        let mut buf = ByteBuffer::new();
        assert!(buf.end_of_data());
        buf.seek(0, SeekMode::Start);
        assert!(buf.is_valid());
    }

    #[test]
    fn shared_cursor_supports_read_then_overwrite() {
        let mut buf = ByteBuffer::from_slice(b"patchable");
        let mut head = [0u8; 5];
        assert_eq!(buf.read(&mut head), 5);
        // Overwrite in place at the shared cursor position.
        buf.write(b"ED!!");
        assert_eq!(buf.as_slice(), b"patchED!!");
    }
}
