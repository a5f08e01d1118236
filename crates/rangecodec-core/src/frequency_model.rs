//! Static frequency model shared by the encoder and decoder.
//!
//! The histogram and the cumulative table derived from it are a wire
//! contract: both sides iterate symbols in ascending byte order, so the
//! decoder rebuilds a bit-identical table from the persisted counts.

use crate::status::{CodecError, Result};

/// Number of symbols in the alphabet (bytes 0-255).
pub const NUM_SYMBOLS: usize = 256;

/// Per-symbol count cap. Occurrences beyond the cap are not counted;
/// the persisted (capped) table is what both sides code against, so
/// the model stays internally consistent.
pub const MAX_FREQ: u32 = 16383;

/// Byte-value occurrence counts, iterated in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; NUM_SYMBOLS],
}

impl Histogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_SYMBOLS],
        }
    }

    /// Counts occurrences per byte value, capping each at [`MAX_FREQ`].
    pub fn from_bytes(input: &[u8]) -> Self {
        let mut histogram = Self::new();
        for &byte in input {
            let count = &mut histogram.counts[byte as usize];
            if *count < MAX_FREQ {
                *count += 1;
            }
        }
        histogram
    }

    /// Sets the count for a symbol (used when rebuilding the model from
    /// a persisted frame).
    pub fn set_count(&mut self, symbol: u8, count: u32) {
        self.counts[symbol as usize] = count;
    }

    /// Returns the count for a symbol.
    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Iterates `(symbol, count)` pairs with nonzero count in ascending
    /// byte order. This order determines range assignment on both sides.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Number of distinct symbols with nonzero count.
    pub fn num_distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

/// One symbol's slice `[low, high)` of the cumulative range `[0, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRange {
    pub symbol: u8,
    pub low: u32,
    pub high: u32,
}

/// Cumulative frequency table: a gap-free, non-overlapping partition of
/// `[0, total)` with entries in ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeTable {
    entries: Vec<SymbolRange>,
    total: u32,
}

impl CumulativeTable {
    /// Builds the table by accumulating a running offset over the
    /// histogram entries in ascending byte order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyModel`] when the histogram total is
    /// zero; the interval arithmetic divides by the total, so callers
    /// must special-case empty input before reaching this point.
    pub fn from_histogram(histogram: &Histogram) -> Result<Self> {
        let mut entries = Vec::with_capacity(histogram.num_distinct_symbols());
        let mut offset: u32 = 0;
        for (symbol, count) in histogram.entries() {
            entries.push(SymbolRange {
                symbol,
                low: offset,
                high: offset + count,
            });
            offset += count;
        }
        if offset == 0 {
            return Err(CodecError::EmptyModel);
        }
        Ok(Self {
            entries,
            total: offset,
        })
    }

    /// Sum of all counts; every range is a slice of `[0, total)`.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Entries in ascending symbol order.
    pub fn entries(&self) -> &[SymbolRange] {
        &self.entries
    }

    /// Looks up the range assigned to `symbol` (encode path).
    pub fn range_for(&self, symbol: u8) -> Result<SymbolRange> {
        self.entries
            .binary_search_by_key(&symbol, |entry| entry.symbol)
            .map(|index| self.entries[index])
            .map_err(|_| CodecError::UnknownSymbol(symbol))
    }

    /// Finds the unique entry whose `[low, high)` contains `scaled`
    /// (decode path). The ranges are non-overlapping and exhaustive by
    /// construction, so any `scaled < total` has exactly one owner.
    pub fn locate(&self, scaled: u32) -> Result<SymbolRange> {
        if scaled >= self.total {
            return Err(CodecError::Malformed(format!(
                "scaled value {} outside cumulative range [0, {})",
                scaled, self.total
            )));
        }
        let index = self.entries.partition_point(|entry| entry.high <= scaled);
        Ok(self.entries[index])
    }
}
