//! Line discipline for the control link
//!
//! Messages are single UTF-8 lines terminated by `\n`; a `\r` immediately
//! before the terminator is tolerated and stripped. The reader is fed
//! received bytes and yields at most one complete line at a time. An
//! overlong line is reported once, then discarded up to its terminator,
//! so the stream resynchronizes on the next line.

/// Maximum line length in bytes, terminator excluded.
pub const MAX_LINE: usize = 128;

/// One complete received line, terminator stripped.
pub type Line = heapless::String<MAX_LINE>;

/// Errors from the line reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// Line exceeded [`MAX_LINE`] bytes
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::Overflow => write!(f, "line longer than {MAX_LINE} bytes"),
            LineError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LineError {}

/// Incremental reader assembling complete lines from received bytes
#[derive(Debug, Clone)]
pub struct LineReader {
    buf: heapless::Vec<u8, MAX_LINE>,
    discarding: bool,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Create a new line reader
    pub const fn new() -> Self {
        LineReader {
            buf: heapless::Vec::new(),
            discarding: false,
        }
    }

    /// Drop any partially assembled line
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }

    /// Feed a single byte to the reader
    ///
    /// Returns `Ok(Some(line))` when a complete line is assembled,
    /// `Ok(None)` when more bytes are needed. Overflow is reported once
    /// per overlong line; the rest of that line is dropped silently.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == b'\n' {
            if self.discarding {
                self.discarding = false;
                self.buf.clear();
                return Ok(None);
            }
            let mut bytes = core::mem::take(&mut self.buf);
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            return match heapless::String::from_utf8(bytes) {
                Ok(line) => Ok(Some(line)),
                Err(_) => Err(LineError::InvalidUtf8),
            };
        }
        if self.discarding {
            return Ok(None);
        }
        if self.buf.push(byte).is_err() {
            self.buf.clear();
            self.discarding = true;
            return Err(LineError::Overflow);
        }
        Ok(None)
    }

    /// Feed multiple bytes to the reader
    ///
    /// Returns the first complete line found, if any. Remaining bytes
    /// after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Line>, LineError> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
