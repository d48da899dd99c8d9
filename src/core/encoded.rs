use std::borrow::Cow;

/// Byte used to pad an encoded string out to its buffer capacity
pub const PADDING: u8 = 0;

/// Returned when a string does not fit in the requested buffer capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("encoded length {len} exceeds buffer capacity {capacity}")]
pub struct BufferOverflow {
    pub len: usize,
    pub capacity: usize,
}

/// A string stored as a fixed-capacity, zero-padded UTF-8 byte buffer.
///
/// The effective length is the number of bytes before the first padding byte.
/// Text containing a literal NUL byte cannot round-trip, since everything from
/// the NUL onward is treated as padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedString {
    buffer: Box<[u8]>,
    effective_len: usize,
}

impl EncodedString {
    /// Encode `text` into a buffer of exactly `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferOverflow`] when the UTF-8 encoding of `text` is longer
    /// than `capacity`. The text is never truncated.
    pub fn encode(text: &str, capacity: usize) -> Result<Self, BufferOverflow> {
        let bytes = text.as_bytes();
        if bytes.len() > capacity {
            return Err(BufferOverflow {
                len: bytes.len(),
                capacity,
            });
        }

        let mut buffer = vec![PADDING; capacity].into_boxed_slice();
        buffer[..bytes.len()].copy_from_slice(bytes);
        let effective_len = buffer
            .iter()
            .position(|&b| b == PADDING)
            .unwrap_or(capacity);

        Ok(Self {
            buffer,
            effective_len,
        })
    }

    /// Reconstruct the original text from the non-padding prefix
    #[must_use]
    pub fn decode(&self) -> Cow<'_, str> {
        // The prefix ends on an ASCII NUL or the buffer end, so it is always a
        // complete UTF-8 sequence when the buffer came from `encode`.
        String::from_utf8_lossy(self.as_bytes())
    }

    /// The non-padding prefix
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.effective_len]
    }

    /// The whole buffer, padding included
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn effective_len(&self) -> usize {
        self.effective_len
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effective_len == 0
    }
}
