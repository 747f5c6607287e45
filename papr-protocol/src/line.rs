//! Line framing for the serial command channel.
//!
//! The host writes one command per line:
//! - `\n` or `\r` terminates a command
//! - control bytes (below 0x20) are dropped
//! - surrounding whitespace is trimmed and empty lines are ignored
//!
//! Lines are accumulated into a fixed-capacity buffer so the assembler can
//! live in a static on targets without a large heap.

use heapless::{String, Vec};

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// The current line exceeded the assembler capacity and was dropped
    LineTooLong,
    /// The completed line was not valid UTF-8 and was dropped
    InvalidUtf8,
}

/// State machine for splitting a byte stream into command lines
#[derive(Debug, Clone)]
pub struct LineAssembler<const N: usize> {
    buffer: Vec<u8, N>,
    state: AssembleState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssembleState {
    /// Collecting bytes of the current line
    Collecting,
    /// Line overflowed; skipping until the next terminator
    Discarding,
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: AssembleState::Collecting,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = AssembleState::Collecting;
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the line had to
    /// be dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<N>>, LineError> {
        if byte == b'\n' || byte == b'\r' {
            let state = self.state;
            self.state = AssembleState::Collecting;
            if state == AssembleState::Discarding {
                self.buffer.clear();
                return Ok(None);
            }
            return self.take_line();
        }

        // Silently ignore control characters
        if byte < 0x20 || self.state == AssembleState::Discarding {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            warn!("Line exceeds {} bytes, dropping", N);
            self.buffer.clear();
            self.state = AssembleState::Discarding;
            return Err(LineError::LineTooLong);
        }

        Ok(None)
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete line found, if any, together with the
    /// number of bytes consumed. Bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<String<N>>, LineError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                result => return (i + 1, result),
            }
        }
        (bytes.len(), Ok(None))
    }

    fn take_line(&mut self) -> Result<Option<String<N>>, LineError> {
        let raw = core::mem::take(&mut self.buffer);
        let text = match core::str::from_utf8(&raw) {
            Ok(text) => text.trim(),
            Err(_) => {
                warn!("Dropping line with invalid UTF-8 ({} bytes)", raw.len());
                return Err(LineError::InvalidUtf8);
            }
        };

        if text.is_empty() {
            return Ok(None);
        }

        let mut line = String::new();
        // Cannot fail: the trimmed text is no longer than the buffer
        let _ = line.push_str(text);
        Ok(Some(line))
    }
}
