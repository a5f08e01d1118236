//! MSB-first bit packing with an exact bit count.
//!
//! The wire format packs bits most-significant-first and zero-pads the
//! final byte; the explicit bit count (persisted by the container) is
//! what distinguishes padding from data.

/// Packs an ordered sequence of bits into bytes, MSB-first.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one bit. The underlying byte grows MSB-first, so the
    /// unused low bits of the final byte stay zero.
    pub fn push(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let byte_offset = self.bit_len / 8;
            let bit_shift = 7 - (self.bit_len % 8);
            self.bytes[byte_offset] |= 1 << bit_shift;
        }
        self.bit_len += 1;
    }

    /// Appends `count` copies of `bit` (pending-bit drains).
    pub fn push_run(&mut self, bit: bool, count: u32) {
        for _ in 0..count {
            self.push(bit);
        }
    }

    /// Number of meaningful bits written.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Packed bytes; `ceil(bit_len / 8)` of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the writer, returning `(bytes, bit_len)`.
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.bytes, self.bit_len)
    }
}

/// Cursor over a packed bit sequence with a declared bit count.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_len: usize,
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// `bit_len` bounds the read; padding bits past it are never
    /// surfaced even when the byte slice is longer.
    pub fn new(bytes: &'a [u8], bit_len: usize) -> Self {
        Self {
            bytes,
            bit_len,
            cursor: 0,
        }
    }

    /// Next bit, or `None` once the declared count is exhausted.
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.cursor >= self.bit_len {
            return None;
        }
        let byte_offset = self.cursor / 8;
        let bit_shift = 7 - (self.cursor % 8);
        let bit = (self.bytes[byte_offset] >> bit_shift) & 1;
        self.cursor += 1;
        Some(bit != 0)
    }

    /// Next bit, or zero once the stream is exhausted. The decoder's
    /// renormalization keeps shifting bits in after the real stream
    /// ends; those trailing bits are zero by definition.
    pub fn next_bit_or_zero(&mut self) -> bool {
        self.next_bit().unwrap_or(false)
    }

    /// Number of bits consumed so far.
    pub fn bits_read(&self) -> usize {
        self.cursor
    }

    /// Remaining meaningful bits.
    pub fn remaining(&self) -> usize {
        self.bit_len - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut writer = BitWriter::new();
        for bit in [true, false, true, true] {
            writer.push(bit);
        }
        // 1011 packed into the high nibble, low bits zero-padded.
        assert_eq!(writer.as_bytes(), &[0b1011_0000]);
        assert_eq!(writer.bit_len(), 4);
    }

    #[test]
    fn test_multi_byte_packing() {
        let mut writer = BitWriter::new();
        writer.push_run(true, 8);
        writer.push(false);
        writer.push(true);
        assert_eq!(writer.as_bytes(), &[0xFF, 0b0100_0000]);
        assert_eq!(writer.bit_len(), 10);
    }

    #[test]
    fn test_reader_honors_bit_count() {
        let bytes = [0b1011_0000u8];
        let mut reader = BitReader::new(&bytes, 4);
        let bits: Vec<bool> = std::iter::from_fn(|| reader.next_bit()).collect();
        assert_eq!(bits, vec![true, false, true, true]);
        // Padding is not surfaced.
        assert_eq!(reader.next_bit(), None);
        assert!(!reader.next_bit_or_zero());
    }

    #[test]
    fn test_writer_reader_roundtrip() {
        let pattern: Vec<bool> = (0..37).map(|i| i % 3 == 0).collect();
        let mut writer = BitWriter::new();
        for &bit in &pattern {
            writer.push(bit);
        }
        let (bytes, bit_len) = writer.into_parts();
        assert_eq!(bytes.len(), (bit_len + 7) / 8);

        let mut reader = BitReader::new(&bytes, bit_len);
        let decoded: Vec<bool> = std::iter::from_fn(|| reader.next_bit()).collect();
        assert_eq!(decoded, pattern);
        assert_eq!(reader.bits_read(), bit_len);
        assert_eq!(reader.remaining(), 0);
    }
}
