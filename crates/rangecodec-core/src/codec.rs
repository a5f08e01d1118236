//! Top-level compress/decompress operations.

use crate::bit_utils::BitReader;
use crate::container::Frame;
use crate::frequency_model::{CumulativeTable, Histogram};
use crate::range_decoder;
use crate::range_encoder;
use crate::status::{CodecError, Result};

/// Compresses a byte buffer into a serialized frame.
///
/// Empty input short-circuits to a zero-entry, zero-symbol, zero-bit
/// frame; building cumulative ranges from an empty histogram would
/// otherwise divide by zero downstream.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        let frame = Frame {
            histogram: Histogram::new(),
            symbol_count: 0,
            bit_len: 0,
            payload: Vec::new(),
        };
        return Ok(frame.serialize());
    }

    let histogram = Histogram::from_bytes(input);
    let table = CumulativeTable::from_histogram(&histogram)?;
    let bits = range_encoder::encode(input, &table)?;
    let (payload, bit_len) = bits.into_parts();

    let frame = Frame {
        histogram,
        symbol_count: input.len() as u32,
        bit_len: bit_len as u32,
        payload,
    };
    Ok(frame.serialize())
}

/// Decompresses a serialized frame back into the original bytes.
///
/// The cumulative table is rebuilt from the persisted histogram with
/// the same ascending-byte ordering rule the encoder used, so the two
/// tables are bit-for-bit equivalent.
pub fn decompress(artifact: &[u8]) -> Result<Vec<u8>> {
    let frame = Frame::deserialize(artifact)?;
    if frame.symbol_count == 0 {
        return Ok(Vec::new());
    }

    let table = CumulativeTable::from_histogram(&frame.histogram).map_err(|err| match err {
        CodecError::EmptyModel => {
            CodecError::Malformed("nonzero symbol count with an empty histogram".into())
        }
        other => other,
    })?;

    let bits = BitReader::new(&frame.payload, frame.bit_len as usize);
    range_decoder::decode(bits, &table, frame.symbol_count as usize)
}
