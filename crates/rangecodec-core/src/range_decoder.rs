//! Mirror state machine of the range encoder.
//!
//! The decoder tracks the same `[low, high]` interval plus a 16-bit
//! `value` window over the bit stream. It must replay the encoder's
//! bit consumption exactly: every renormalization shift pulls the next
//! stream bit (or zero once the stream is exhausted) into the window.
//! Termination is driven by the persisted symbol count; the format
//! carries no in-band terminator.

use crate::bit_utils::BitReader;
use crate::frequency_model::CumulativeTable;
use crate::range_encoder::{FIRST_QTR, HALF, THIRD_QTR, TOP};
use crate::status::{CodecError, Result};

pub struct RangeDecoder<'a, 'b> {
    table: &'a CumulativeTable,
    bits: BitReader<'b>,
    low: u32,
    high: u32,
    value: u32,
}

impl<'a, 'b> RangeDecoder<'a, 'b> {
    /// Seeds the 16-bit value window from the stream, zero-padding
    /// when the stream is shorter.
    pub fn new(table: &'a CumulativeTable, mut bits: BitReader<'b>) -> Self {
        let mut value = 0;
        for _ in 0..16 {
            value = (value << 1) | bits.next_bit_or_zero() as u32;
        }
        Self {
            table,
            bits,
            low: 0,
            high: TOP,
            value,
        }
    }

    /// Decodes the next symbol and renormalizes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Malformed`] when the value window falls
    /// outside the current interval or maps outside the cumulative
    /// range, which only happens for corrupt or mismatched streams,
    /// and [`CodecError::PrecisionExceeded`] when a slice collapses.
    pub fn decode_symbol(&mut self) -> Result<u8> {
        if self.value < self.low || self.value > self.high {
            return Err(CodecError::Malformed(format!(
                "value {} outside interval [{}, {}]",
                self.value, self.low, self.high
            )));
        }
        let range = (self.high - self.low + 1) as u64;
        let total = self.table.total() as u64;
        let scaled = (((self.value - self.low + 1) as u64 * total - 1) / range) as u32;

        let sym = self.table.locate(scaled)?;

        // Same narrowing as the encoder, from the found symbol's slice.
        let high_offset = range * sym.high as u64 / total;
        let low_offset = range * sym.low as u64 / total;
        if high_offset <= low_offset {
            return Err(CodecError::PrecisionExceeded(self.table.total()));
        }
        self.high = self.low + high_offset as u32 - 1;
        self.low += low_offset as u32;

        self.renormalize();
        Ok(sym.symbol)
    }

    fn renormalize(&mut self) {
        loop {
            if self.high < HALF {
                // E1
            } else if self.low >= HALF {
                // E2
                self.low -= HALF;
                self.high -= HALF;
                self.value -= HALF;
            } else if self.low >= FIRST_QTR && self.high < THIRD_QTR {
                // E3
                self.low -= FIRST_QTR;
                self.high -= FIRST_QTR;
                self.value -= FIRST_QTR;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.value = (self.value << 1) | self.bits.next_bit_or_zero() as u32;
            debug_assert!(self.low <= self.high);
        }
    }
}

/// Decodes exactly `symbol_count` symbols from the bit stream.
pub fn decode(bits: BitReader<'_>, table: &CumulativeTable, symbol_count: usize) -> Result<Vec<u8>> {
    let mut decoder = RangeDecoder::new(table, bits);
    let mut output = Vec::with_capacity(symbol_count);
    for _ in 0..symbol_count {
        output.push(decoder.decode_symbol()?);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency_model::Histogram;
    use crate::range_encoder;

    fn roundtrip(input: &[u8]) -> Vec<u8> {
        let histogram = Histogram::from_bytes(input);
        let table = CumulativeTable::from_histogram(&histogram).unwrap();
        let bits = range_encoder::encode(input, &table).unwrap();
        let (bytes, bit_len) = bits.into_parts();
        decode(BitReader::new(&bytes, bit_len), &table, input.len()).unwrap()
    }

    #[test]
    fn test_literal_scenario_roundtrip() {
        assert_eq!(roundtrip(b"ABBCCCDDDD"), b"ABBCCCDDDD");
    }

    #[test]
    fn test_single_symbol_roundtrip() {
        let input = [7u8; 1000];
        assert_eq!(roundtrip(&input), input);
    }

    #[test]
    fn test_full_alphabet_roundtrip() {
        let input: Vec<u8> = (0..=255u8).collect();
        assert_eq!(roundtrip(&input), input);
    }

    #[test]
    fn test_skewed_distribution_roundtrip() {
        let mut input = vec![0u8; 900];
        input.extend_from_slice(&[1u8; 90]);
        input.extend_from_slice(&[2u8; 9]);
        input.push(3);
        assert_eq!(roundtrip(&input), input);
    }

    #[test]
    fn test_consecutive_underflow_roundtrip() {
        // The B slice keeps the interval straddling the midpoint, so
        // several E3 renormalizations stack up before any bit settles.
        let mut histogram = Histogram::new();
        histogram.set_count(b'A', 1);
        histogram.set_count(b'B', 2);
        histogram.set_count(b'C', 1);
        let table = CumulativeTable::from_histogram(&histogram).unwrap();

        let input = b"BBBBBBAC";
        let bits = range_encoder::encode(input, &table).unwrap();
        let (bytes, bit_len) = bits.into_parts();
        let decoded = decode(BitReader::new(&bytes, bit_len), &table, input.len()).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_decode_replays_exact_bit_consumption() {
        let input = b"mississippi river";
        let histogram = Histogram::from_bytes(input);
        let table = CumulativeTable::from_histogram(&histogram).unwrap();
        let bits = range_encoder::encode(input, &table).unwrap();
        let (bytes, bit_len) = bits.into_parts();

        let mut decoder = RangeDecoder::new(&table, BitReader::new(&bytes, bit_len));
        let mut output = Vec::new();
        for _ in 0..input.len() {
            output.push(decoder.decode_symbol().unwrap());
        }
        assert_eq!(output, input);
        // The decoder never reads past the declared bit count; bits
        // past the flush are synthesized as zeros.
        assert!(decoder.bits.bits_read() <= bit_len);
    }
}
