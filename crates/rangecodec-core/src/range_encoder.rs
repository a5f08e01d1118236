//! Interval-narrowing range encoder with pending-bit carry propagation.
//!
//! The interval `[low, high]` lives in a 16-bit window. Each symbol
//! narrows it to the symbol's cumulative-frequency slice, then the
//! three classic renormalization conditions shift settled bits out:
//!
//! - E1: the interval fits in the lower half, emit 0.
//! - E2: the interval fits in the upper half, emit 1.
//! - E3: the interval straddles the midpoint within the middle two
//!   quarters (underflow); defer a bit and flush it with inverted
//!   value once E1 or E2 resolves which half won.
//!
//! Correct narrowing needs every symbol's slice of the interval to be
//! nonempty, which holds whenever the table total stays within a
//! quarter of the window width. The per-symbol count cap bounds each
//! count but not the total, so an input with many high-count symbols
//! can still exceed that; the coder detects the collapsed slice and
//! fails with [`CodecError::PrecisionExceeded`] instead of emitting a
//! stream that cannot be decoded.

use crate::bit_utils::BitWriter;
use crate::frequency_model::CumulativeTable;
use crate::status::{CodecError, Result};

/// Upper bound of the interval window.
pub const TOP: u32 = 0xFFFF;
pub const FIRST_QTR: u32 = (TOP + 1) / 4;
pub const HALF: u32 = 2 * FIRST_QTR;
pub const THIRD_QTR: u32 = 3 * FIRST_QTR;

pub struct RangeEncoder<'a> {
    table: &'a CumulativeTable,
    low: u32,
    high: u32,
    pending: u32,
    out: BitWriter,
}

impl<'a> RangeEncoder<'a> {
    pub fn new(table: &'a CumulativeTable) -> Self {
        Self {
            table,
            low: 0,
            high: TOP,
            pending: 0,
            out: BitWriter::new(),
        }
    }

    /// Narrows the interval to `symbol`'s slice and renormalizes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownSymbol`] when the symbol has no
    /// range in the table, or [`CodecError::PrecisionExceeded`] when
    /// the symbol's slice of the interval collapses to nothing.
    pub fn encode_symbol(&mut self, symbol: u8) -> Result<()> {
        let sym = self.table.range_for(symbol)?;
        let range = (self.high - self.low + 1) as u64;
        let total = self.table.total() as u64;

        // The new high is computed from the pre-update low; products
        // are widened to u64 so the result matches the unbounded
        // integer formula even when range * high exceeds 32 bits.
        let high_offset = range * sym.high as u64 / total;
        let low_offset = range * sym.low as u64 / total;
        if high_offset <= low_offset {
            // The slice collapsed to nothing: the table total is too
            // large for the interval width (see module docs).
            return Err(CodecError::PrecisionExceeded(self.table.total()));
        }
        self.high = self.low + high_offset as u32 - 1;
        self.low += low_offset as u32;

        self.renormalize();
        Ok(())
    }

    /// Flushes the final interval so the decoder can disambiguate it,
    /// returning the finished bit sequence.
    pub fn finish(mut self) -> BitWriter {
        self.pending += 1;
        if self.low < FIRST_QTR {
            self.out.push(false);
            self.out.push_run(true, self.pending);
        } else {
            self.out.push(true);
            self.out.push_run(false, self.pending);
        }
        self.out
    }

    fn renormalize(&mut self) {
        loop {
            if self.high < HALF {
                // E1: settled in the lower half.
                self.emit(false);
            } else if self.low >= HALF {
                // E2: settled in the upper half.
                self.emit(true);
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= FIRST_QTR && self.high < THIRD_QTR {
                // E3: underflow; defer the bit.
                self.pending += 1;
                self.low -= FIRST_QTR;
                self.high -= FIRST_QTR;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            debug_assert!(self.low <= self.high);
        }
    }

    fn emit(&mut self, bit: bool) {
        self.out.push(bit);
        self.out.push_run(!bit, self.pending);
        self.pending = 0;
    }
}

/// Encodes a full byte sequence against `table`.
pub fn encode(input: &[u8], table: &CumulativeTable) -> Result<BitWriter> {
    let mut encoder = RangeEncoder::new(table);
    for &byte in input {
        encoder.encode_symbol(byte)?;
    }
    Ok(encoder.finish())
}
