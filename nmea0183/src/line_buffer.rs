use alloc::vec::Vec;

use crate::{
    constants::{NMEA_END_CHAR_1, NMEA_END_CHAR_2},
    error::LineError,
};

/// Longest line kept by default; anything longer is dropped as noise.
/// Leaves room for proprietary sentences beyond the 82 character limit.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 256;

/// Byte storage a [`LineBuffer`] accumulates partial lines in.
///
/// Implemented for `Vec<u8>` (grows as needed) and [`FixedLinearBuffer`]
/// (caller provided slice, no allocation).
pub trait UnderlyingBuffer:
    core::ops::Index<core::ops::Range<usize>, Output = [u8]> + core::ops::Index<usize, Output = u8>
{
    fn clear(&mut self);

    /// Bytes currently held
    fn len(&self) -> usize;

    /// Most bytes the storage can ever hold. Once a line without a
    /// terminator fills this much, the splitter gives up on it and reports
    /// it as too long. Growable storage returns `usize::MAX` and leaves the
    /// cut to [`LineBuffer::with_max_line_length`].
    fn max_capacity(&self) -> usize;

    /// Appends as much of `other` as fits, returning how many trailing bytes
    /// were left out.
    fn extend_from_slice(&mut self, other: &[u8]) -> usize;

    /// Shifts out the first `count` bytes, or everything if fewer are held.
    fn drain(&mut self, count: usize);

    /// Keeps only the first `len` bytes.
    fn truncate(&mut self, len: usize);

    /// Position of the first `value` byte
    fn find(&self, value: u8) -> Option<usize> {
        (0..self.len()).find(|&i| self[i] == value)
    }

    /// Position of the last `value` byte
    fn rfind(&self, value: u8) -> Option<usize> {
        (0..self.len()).rev().find(|&i| self[i] == value)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// No room left for another byte of the current line
    fn is_full(&self) -> bool {
        self.len() >= self.max_capacity()
    }
}

impl UnderlyingBuffer for Vec<u8> {
    fn clear(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn max_capacity(&self) -> usize {
        usize::MAX
    }

    fn extend_from_slice(&mut self, other: &[u8]) -> usize {
        self.extend_from_slice(other);
        0
    }

    fn drain(&mut self, count: usize) {
        self.drain(0..count.min(self.len()));
    }

    fn truncate(&mut self, len: usize) {
        self.truncate(len);
    }

    fn find(&self, value: u8) -> Option<usize> {
        self.iter().position(|elem| *elem == value)
    }

    fn rfind(&self, value: u8) -> Option<usize> {
        self.iter().rposition(|elem| *elem == value)
    }
}

/// Caller provided storage for allocation free line splitting
pub struct FixedLinearBuffer<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl<'a> FixedLinearBuffer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buffer: buf,
            len: 0,
        }
    }
}

impl core::ops::Index<core::ops::Range<usize>> for FixedLinearBuffer<'_> {
    type Output = [u8];

    fn index(&self, index: core::ops::Range<usize>) -> &Self::Output {
        if index.end > self.len {
            panic!("Index {} is outside of our length {}", index.end, self.len);
        }
        self.buffer.index(index)
    }
}

impl core::ops::Index<usize> for FixedLinearBuffer<'_> {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.buffer[index]
    }
}

impl UnderlyingBuffer for FixedLinearBuffer<'_> {
    fn clear(&mut self) {
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn max_capacity(&self) -> usize {
        self.buffer.len()
    }

    fn extend_from_slice(&mut self, other: &[u8]) -> usize {
        let to_copy = core::cmp::min(other.len(), self.buffer.len() - self.len);
        self.buffer[self.len..self.len + to_copy].copy_from_slice(&other[..to_copy]);
        self.len += to_copy;
        other.len() - to_copy
    }

    fn drain(&mut self, count: usize) {
        if count >= self.len {
            self.len = 0;
            return;
        }
        self.buffer.copy_within(count..self.len, 0);
        self.len -= count;
    }

    fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }
}

/// Splits a raw byte stream from a serial port or file into text lines.
///
/// Bytes are handed over with [`LineBuffer::consume`] in whatever chunks the
/// transport delivers; a line split across two chunks is kept until its
/// terminating `\n` arrives. Lines are yielded without their `\r\n` and blank
/// lines are skipped.
pub struct LineBuffer<T: UnderlyingBuffer> {
    buf: T,
    max_line_length: usize,
    /// Bytes lost and not yet reported
    discarded: usize,
    /// The next terminator past `intact` ends a line with lost bytes
    dropping: bool,
    /// Leading buffered bytes known to be whole lines
    intact: usize,
}

impl Default for LineBuffer<Vec<u8>> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: UnderlyingBuffer> LineBuffer<T> {
    pub fn new(underlying: T) -> Self {
        Self {
            buf: underlying,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            discarded: 0,
            dropping: false,
            intact: 0,
        }
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Drops any partial line, e.g. after reopening a port
    pub fn clear(&mut self) {
        self.buf.clear();
        self.discarded = 0;
        self.dropping = false;
        self.intact = 0;
    }

    fn drain(&mut self, count: usize) {
        self.buf.drain(count);
        self.intact = self.intact.saturating_sub(count);
    }

    pub fn consume<'a>(&'a mut self, new_data: &'a [u8]) -> LineIter<'a, T> {
        LineIter {
            lines: self,
            data: new_data,
            consumed: 0,
        }
    }
}

/// Iterator-like object over the complete lines available after a
/// [`LineBuffer::consume`] call
pub struct LineIter<'a, T: UnderlyingBuffer> {
    lines: &'a mut LineBuffer<T>,
    data: &'a [u8],
    consumed: usize,
}

impl<T: UnderlyingBuffer> LineIter<'_, T> {
    /// Returns the next line, or `None` once every complete line has been
    /// taken and the remaining bytes are buffered for the next call.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<&str, LineError>> {
        let lines = &mut *self.lines;
        lines.drain(core::mem::take(&mut self.consumed));

        loop {
            if !lines.dropping && lines.discarded > 0 && lines.intact == 0 {
                let dropped = core::mem::take(&mut lines.discarded);
                return Some(Err(LineError::LineTooLong { dropped }));
            }

            if let Some(end) = lines.buf.find(NMEA_END_CHAR_2) {
                let lost = lines.dropping && end >= lines.intact;
                if lost || end > lines.max_line_length {
                    let dropped = core::mem::take(&mut lines.discarded) + end + 1;
                    lines.dropping = false;
                    lines.drain(end + 1);
                    return Some(Err(LineError::LineTooLong { dropped }));
                }
                let line = &lines.buf[0..end];
                let blank = line.iter().all(u8::is_ascii_whitespace);
                if blank {
                    lines.drain(end + 1);
                    continue;
                }
                self.consumed = end + 1;
                let line = &self.lines.buf[0..end];
                let line = line.strip_suffix(&[NMEA_END_CHAR_1]).unwrap_or(line);
                return Some(core::str::from_utf8(line).map_err(|_| LineError::InvalidUtf8));
            }

            if lines.buf.is_full() || lines.buf.len() > lines.max_line_length {
                lines.discarded += lines.buf.len();
                lines.dropping = true;
                lines.buf.clear();
            }
            if self.data.is_empty() {
                return None;
            }
            let uncopied = lines.buf.extend_from_slice(self.data);
            self.data = &self.data[self.data.len() - uncopied..];
        }
    }
}

impl<T: UnderlyingBuffer> Drop for LineIter<'_, T> {
    fn drop(&mut self) {
        let lines = &mut *self.lines;
        lines.drain(self.consumed);
        if self.data.is_empty() {
            return;
        }
        let uncopied = lines.buf.extend_from_slice(self.data);
        if uncopied == 0 {
            return;
        }

        // No room for the rest: keep the whole lines already buffered and
        // count everything after them as lost
        let lost = &self.data[self.data.len() - uncopied..];
        let intact = if lines.dropping {
            lines.intact
        } else {
            lines.buf.rfind(NMEA_END_CHAR_2).map_or(0, |end| end + 1)
        };
        lines.discarded += lines.buf.len() - intact + uncopied;
        lines.buf.truncate(intact);
        lines.intact = intact;
        lines.dropping = lost.last() != Some(&NMEA_END_CHAR_2);
    }
}
