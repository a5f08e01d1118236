//! Serialized artifact framing.
//!
//! Wire layout, all integers little-endian:
//!
//! | field               | type                     |
//! |---------------------|--------------------------|
//! | histogram entries   | u32                      |
//! | entries             | repeated (u8, u32), ascending symbol order |
//! | original symbols    | u32                      |
//! | bit length          | u32                      |
//! | packed bits         | ceil(bit_length / 8) bytes, MSB-first |
//!
//! Deserialization is strict: truncated input, out-of-order or
//! duplicate histogram symbols, zero counts, payload size mismatches
//! and trailing bytes are all explicit errors rather than silently
//! decoded garbage.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::frequency_model::{Histogram, MAX_FREQ};
use crate::status::{CodecError, Result};

/// A complete compressed artifact: the persisted model plus the bit
/// stream and the symbol count that drives the decoder loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub histogram: Histogram,
    pub symbol_count: u32,
    pub bit_len: u32,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            4 + self.histogram.num_distinct_symbols() * 5 + 8 + self.payload.len(),
        );
        // Writes to a Vec cannot fail.
        out.write_u32::<LittleEndian>(self.histogram.num_distinct_symbols() as u32)
            .unwrap();
        for (symbol, count) in self.histogram.entries() {
            out.write_u8(symbol).unwrap();
            out.write_u32::<LittleEndian>(count).unwrap();
        }
        out.write_u32::<LittleEndian>(self.symbol_count).unwrap();
        out.write_u32::<LittleEndian>(self.bit_len).unwrap();
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Frame> {
        let mut cursor = Cursor::new(bytes);

        let entry_count = cursor.read_u32::<LittleEndian>()?;
        if entry_count > 256 {
            return Err(CodecError::Malformed(format!(
                "histogram declares {} entries for a 256-symbol alphabet",
                entry_count
            )));
        }

        let mut histogram = Histogram::new();
        let mut previous: Option<u8> = None;
        for _ in 0..entry_count {
            let symbol = cursor.read_u8()?;
            let count = cursor.read_u32::<LittleEndian>()?;
            if let Some(prev) = previous {
                if symbol <= prev {
                    return Err(CodecError::Malformed(format!(
                        "histogram entries out of order: {:#04x} after {:#04x}",
                        symbol, prev
                    )));
                }
            }
            if count == 0 {
                return Err(CodecError::Malformed(format!(
                    "histogram entry {:#04x} has a zero count",
                    symbol
                )));
            }
            if count > MAX_FREQ {
                return Err(CodecError::Malformed(format!(
                    "histogram entry {:#04x} has count {} above the cap {}",
                    symbol, count, MAX_FREQ
                )));
            }
            histogram.set_count(symbol, count);
            previous = Some(symbol);
        }

        let symbol_count = cursor.read_u32::<LittleEndian>()?;
        let bit_len = cursor.read_u32::<LittleEndian>()?;

        let payload_len = (bit_len as usize + 7) / 8;
        let pos = cursor.position() as usize;
        let remaining = &bytes[pos..];
        if remaining.len() < payload_len {
            return Err(CodecError::Truncated(format!(
                "payload needs {} bytes, {} remain",
                payload_len,
                remaining.len()
            )));
        }
        if remaining.len() > payload_len {
            return Err(CodecError::Malformed(format!(
                "{} trailing bytes after payload",
                remaining.len() - payload_len
            )));
        }

        Ok(Frame {
            histogram,
            symbol_count,
            bit_len,
            payload: remaining.to_vec(),
        })
    }
}
