//! Fixed-capacity display storage backing the on-screen editable control.
//!
//! Immediate-mode text controls edit a caller-owned buffer of fixed size.
//! [`DisplayBuffer`] is that buffer: 1024 bytes of UTF-8 with a terminating
//! NUL sentinel, refreshed from the session's canonical text each frame and
//! read back after edits. The canonical text is never truncated; only this
//! display copy is, always on a character boundary.

/// Size of the display buffer in bytes, including the sentinel byte.
///
/// At most [`DisplayBuffer::MAX_TEXT_LEN`] bytes of character data fit; the
/// remainder is reserved for the terminating NUL.
pub const DISPLAY_BUFFER_CAPACITY: usize = 1024;

/// Fixed-capacity text storage with a terminating NUL sentinel.
///
/// Writes beyond capacity are silently truncated on a UTF-8 character
/// boundary, so [`as_str`](Self::as_str) is always valid UTF-8 and always
/// at most [`Self::MAX_TEXT_LEN`] bytes long. The byte after the text is
/// always zero.
#[derive(Clone)]
pub struct DisplayBuffer {
    bytes: [u8; DISPLAY_BUFFER_CAPACITY],
    /// Length of the text prefix in `bytes`, always `<= MAX_TEXT_LEN`.
    len: usize,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    /// Maximum number of text bytes the buffer can hold.
    pub const MAX_TEXT_LEN: usize = DISPLAY_BUFFER_CAPACITY - 1;

    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            bytes: [0; DISPLAY_BUFFER_CAPACITY],
            len: 0,
        }
    }

    /// Replaces the buffer contents with `text`, truncating on a character
    /// boundary if it does not fit.
    pub fn set_text(&mut self, text: &str) {
        let prefix = utf8_prefix(text, Self::MAX_TEXT_LEN);
        self.bytes[..prefix.len()].copy_from_slice(prefix.as_bytes());
        // Zero the tail so the sentinel and any stale bytes are cleared
        self.bytes[prefix.len()..].fill(0);
        self.len = prefix.len();
    }

    /// Appends `text`, truncating on a character boundary at capacity.
    pub fn push_str(&mut self, text: &str) {
        let room = Self::MAX_TEXT_LEN - self.len;
        let suffix = utf8_prefix(text, room);
        self.bytes[self.len..self.len + suffix.len()].copy_from_slice(suffix.as_bytes());
        self.len += suffix.len();
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.bytes[..self.len].fill(0);
        self.len = 0;
    }

    /// Returns the buffer contents as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }

    /// Returns the length of the stored text in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether storing `text` would lose bytes to truncation.
    pub fn would_truncate(text: &str) -> bool {
        text.len() > Self::MAX_TEXT_LEN
    }
}

impl std::fmt::Debug for DisplayBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayBuffer")
            .field("text", &self.as_str())
            .field("len", &self.len)
            .finish()
    }
}

/// Returns the longest prefix of `text` that fits in `max` bytes without
/// splitting a UTF-8 character.
fn utf8_prefix(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
