//! Bounded accumulation buffer for streamed HTTP response bodies.
//!
//! The weather endpoint returns a small JSON document, so the buffer is a
//! fixed-capacity `heapless` vector with no heap involvement. One byte of
//! capacity is held back so the accumulated text can always be terminated,
//! matching the wire contract of the transport layer.

use heapless::Vec;
use log::debug;

/// Default capacity for weather responses.
pub const RESPONSE_CAPACITY: usize = 256;

/// Accumulates body chunks from a single HTTP transaction.
///
/// Appends are whole-chunk-or-nothing: a chunk that would push the logical
/// length past `C - 1` is dropped in its entirety and the prior content is
/// left untouched. An oversized server response therefore shows up downstream
/// as a truncated-JSON parse failure, never as a partial write here.
pub struct ResponseBuffer<const C: usize = RESPONSE_CAPACITY> {
    data: Vec<u8, C>,
}

impl<const C: usize> ResponseBuffer<C> {
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Total capacity in bytes. The usable length is one less.
    pub const fn capacity(&self) -> usize {
        C
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clears the logical length. Capacity is unchanged.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Appends one body chunk, or silently drops it if it would not fit.
    pub fn append(&mut self, chunk: &[u8]) {
        if self.data.len() + chunk.len() > C - 1 {
            debug!(
                "response buffer full, dropping {}-byte chunk ({} of {} bytes used)",
                chunk.len(),
                self.data.len(),
                C
            );
            return;
        }
        // Cannot fail: the length check above guarantees room.
        self.data.extend_from_slice(chunk).ok();
    }

    /// The accumulated bytes, read-only.
    pub fn view(&self) -> &[u8] {
        &self.data
    }

    /// The accumulated bytes as text, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.data).ok()
    }
}

impl<const C: usize> Default for ResponseBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates_chunks() {
        let mut buf: ResponseBuffer<32> = ResponseBuffer::new();
        buf.append(b"{\"data\":");
        buf.append(b"{}}");
        assert_eq!(buf.view(), b"{\"data\":{}}");
        assert_eq!(buf.as_str(), Some("{\"data\":{}}"));
    }

    #[test]
    fn test_append_never_exceeds_capacity_minus_one() {
        let mut buf: ResponseBuffer<16> = ResponseBuffer::new();
        for _ in 0..10 {
            buf.append(b"abcdef");
        }
        assert!(buf.len() <= 15);
    }

    #[test]
    fn test_overflowing_chunk_is_dropped_whole() {
        let mut buf: ResponseBuffer<16> = ResponseBuffer::new();
        buf.append(b"0123456789");
        assert_eq!(buf.len(), 10);

        // 10 + 7 > 15: the whole chunk must be refused, not split.
        buf.append(b"abcdefg");
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.view(), b"0123456789");
    }

    #[test]
    fn test_fill_to_reserved_boundary_is_allowed() {
        let mut buf: ResponseBuffer<16> = ResponseBuffer::new();
        buf.append(b"0123456789");
        buf.append(b"abcde");
        assert_eq!(buf.len(), 15);

        // One more byte would pass the reserved terminator slot.
        buf.append(b"x");
        assert_eq!(buf.len(), 15);
    }

    #[test]
    fn test_reset_clears_length_only() {
        let mut buf: ResponseBuffer<16> = ResponseBuffer::new();
        buf.append(b"stale");
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 16);

        buf.append(b"fresh");
        assert_eq!(buf.as_str(), Some("fresh"));
    }

    #[test]
    fn test_invalid_utf8_has_no_str_view() {
        let mut buf: ResponseBuffer<16> = ResponseBuffer::new();
        buf.append(&[0xff, 0xfe]);
        assert_eq!(buf.as_str(), None);
        assert_eq!(buf.view(), &[0xff, 0xfe]);
    }
}
