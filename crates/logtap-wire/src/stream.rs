//! Seekable typed stream contracts.
//!
//! [`Stream`] is the minimal position/size/exhaustion capability set shared
//! by anything that can be positioned and measured. [`ReadStream`] and
//! [`WriteStream`] refine it with typed extraction and insertion. All
//! fixed-width values travel in native byte order; producer and consumer are
//! on the same host by construction.

/// How a seek target is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekMode {
    /// Absolute position.
    Start,
    /// Relative to the current cursor.
    Current,
    /// Relative to the logical end.
    End,
}

/// Position-aware, size-aware, end-of-data-aware byte container.
pub trait Stream {
    /// Current cursor offset.
    fn tell(&self) -> u64;

    /// Current logical content length, independent of any backing allocation.
    fn size(&self) -> u64;

    /// The sticky exhaustion flag: set once a read could not be fully
    /// satisfied within the logical bounds, cleared only by a seek or an
    /// explicit reset.
    fn end_of_data(&self) -> bool;

    /// Move the cursor. A negative target clamps to zero. Seeking always
    /// succeeds and always clears the exhaustion flag, even when the new
    /// offset lands past [`size`](Stream::size) — the next read then reports
    /// exhaustion. Returns the new offset.
    fn seek(&mut self, position: i64, mode: SeekMode) -> u64;

    /// True while the stream has not hit its end-of-data condition.
    fn is_valid(&self) -> bool {
        !self.end_of_data()
    }
}

macro_rules! typed_get {
    ($($name:ident -> $ty:ty),* $(,)?) => {
        $(
            /// Read one value in native byte order. `None` on a short read,
            /// with the exhaustion flag set.
            fn $name(&mut self) -> Option<$ty> {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                if self.read(&mut raw) == raw.len() {
                    Some(<$ty>::from_ne_bytes(raw))
                } else {
                    None
                }
            }
        )*
    };
}

macro_rules! typed_put {
    ($($name:ident <- $ty:ty),* $(,)?) => {
        $(
            /// Write one value in native byte order.
            fn $name(&mut self, value: $ty) -> &mut Self {
                self.write(&value.to_ne_bytes());
                self
            }
        )*
    };
}

/// Stream refinement for typed extraction.
pub trait ReadStream: Stream {
    /// Copy up to `dst.len()` bytes into `dst`, advancing the cursor by the
    /// number of bytes copied. A short read sets the exhaustion flag.
    fn read(&mut self, dst: &mut [u8]) -> usize;

    typed_get! {
        get_i8 -> i8,
        get_u8 -> u8,
        get_i16 -> i16,
        get_u16 -> u16,
        get_i32 -> i32,
        get_u32 -> u32,
        get_i64 -> i64,
        get_u64 -> u64,
        get_f32 -> f32,
        get_f64 -> f64,
    }

    /// Read one byte as a boolean (any non-zero value is true).
    fn get_bool(&mut self) -> Option<bool> {
        self.get_u8().map(|v| v != 0)
    }

    /// Read byte units until a zero terminator or exhaustion, whichever comes
    /// first. The terminator is consumed but not appended.
    fn get_text(&mut self) -> String {
        let mut out = Vec::new();
        while let Some(unit) = self.get_u8() {
            if unit == 0 {
                break;
            }
            out.push(unit);
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Read 16-bit units until a zero terminator or exhaustion.
    fn get_wide_text(&mut self) -> String {
        let mut units = Vec::new();
        while let Some(unit) = self.get_u16() {
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        String::from_utf16_lossy(&units)
    }

    /// Bounded array variant of [`get_text`](ReadStream::get_text): reads
    /// byte units into `dst` until a zero terminator, exhaustion, or `dst`
    /// is full. The terminator is written into the array when read. Returns
    /// the number of bytes written, terminator included.
    fn get_text_into(&mut self, dst: &mut [u8]) -> usize {
        let mut written = 0;
        while written < dst.len() {
            match self.get_u8() {
                Some(unit) => {
                    dst[written] = unit;
                    written += 1;
                    if unit == 0 {
                        break;
                    }
                }
                None => break,
            }
        }
        written
    }
}

/// Stream refinement for typed insertion. Insertion never partially fails:
/// the underlying storage grows to accommodate the full write.
pub trait WriteStream: Stream {
    /// Write all of `src` at the cursor, advancing it. Returns `src.len()`.
    fn write(&mut self, src: &[u8]) -> usize;

    typed_put! {
        put_i8 <- i8,
        put_u8 <- u8,
        put_i16 <- i16,
        put_u16 <- u16,
        put_i32 <- i32,
        put_u32 <- u32,
        put_i64 <- i64,
        put_u64 <- u64,
        put_f32 <- f32,
        put_f64 <- f64,
    }

    /// Write a boolean as one byte.
    fn put_bool(&mut self, value: bool) -> &mut Self {
        self.put_u8(u8::from(value))
    }

    /// Write the text bytes followed by a single zero terminator. The
    /// terminator is always appended, even if the source contains none.
    fn put_text(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.write(text.as_bytes());
        }
        self.put_u8(0)
    }

    /// Write the text as 16-bit units followed by a zero terminator unit.
    fn put_wide_text(&mut self, text: &str) -> &mut Self {
        for unit in text.encode_utf16() {
            self.put_u16(unit);
        }
        self.put_u16(0)
    }
}
