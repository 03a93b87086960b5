//! Line reading with a cap on how much of one line is kept in memory.

use std::borrow::Cow;
use std::io::{self, BufRead};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reusable buffer for one line of input.
///
/// With a character limit set, at most `4 * (limit + 1)` bytes of a line are
/// retained (plus room for the line terminator); the remainder is consumed
/// and dropped. Any line clipped that way has more than `limit` characters.
pub(crate) struct LineBuffer {
    bytes: Vec<u8>,
    cap: Option<usize>,
    max_chars: usize,
    clipped: bool,
}

impl LineBuffer {
    pub(crate) fn new(max_chars: usize) -> Self {
        let cap = (max_chars > 0).then(|| max_chars.saturating_add(1).saturating_mul(4).saturating_add(2));
        Self {
            bytes: Vec::new(),
            cap,
            max_chars,
            clipped: false,
        }
    }

    fn clear(&mut self) {
        self.bytes.clear();
        self.clipped = false;
    }

    /// Take bytes from `available` up to and including the first newline.
    ///
    /// Returns how many bytes were used and whether the line is finished.
    fn absorb(&mut self, available: &[u8]) -> (usize, bool) {
        let (chunk, done) = match available.iter().position(|&b| b == b'\n') {
            Some(end) => (&available[..=end], true),
            None => (available, false),
        };

        match self.cap {
            Some(cap) if self.bytes.len() + chunk.len() > cap => {
                let room = cap.saturating_sub(self.bytes.len());
                self.bytes.extend_from_slice(&chunk[..room]);
                self.clipped = true;
            }
            _ => self.bytes.extend_from_slice(chunk),
        }
        (chunk.len(), done)
    }

    /// Decoded line without its terminator, and whether it is overlong.
    pub(crate) fn decode(&self) -> (Cow<'_, str>, bool) {
        let mut end = self.bytes.len();
        if !self.clipped {
            if end > 0 && self.bytes[end - 1] == b'\n' {
                end -= 1;
            }
            if end > 0 && self.bytes[end - 1] == b'\r' {
                end -= 1;
            }
        }
        let text = String::from_utf8_lossy(&self.bytes[..end]);
        let overlong = self.clipped || (self.max_chars > 0 && text.chars().count() > self.max_chars);
        (text, overlong)
    }
}

/// Read the next line into `line`. Returns `false` at end of input.
pub(crate) fn read_line<R: BufRead + ?Sized>(reader: &mut R, line: &mut LineBuffer) -> io::Result<bool> {
    line.clear();
    let mut read_any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(read_any);
        }
        read_any = true;
        let (used, done) = line.absorb(available);
        reader.consume(used);
        if done {
            return Ok(true);
        }
    }
}

/// Async counterpart of [`read_line`].
pub(crate) async fn read_line_async<R: AsyncBufRead + Unpin + ?Sized>(
    reader: &mut R,
    line: &mut LineBuffer,
) -> io::Result<bool> {
    line.clear();
    let mut read_any = false;
    loop {
        let available = match reader.fill_buf().await {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(read_any);
        }
        read_any = true;
        let (used, done) = line.absorb(available);
        reader.consume(used);
        if done {
            return Ok(true);
        }
    }
}
