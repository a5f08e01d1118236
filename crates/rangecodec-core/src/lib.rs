//! Rangecodec Core Library
//!
//! Byte-stream compression built on binary arithmetic (range) coding
//! with a static, single-pass frequency model. The coding path is pure
//! integer arithmetic; entropy estimation exists only for diagnostics.

pub mod bit_utils;
pub mod codec;
pub mod container;
pub mod frequency_model;
pub mod range_decoder;
pub mod range_encoder;
pub mod shannon_entropy;
pub mod status;

pub use bit_utils::{BitReader, BitWriter};
pub use codec::{compress, decompress};
pub use container::Frame;
pub use frequency_model::{CumulativeTable, Histogram, SymbolRange, MAX_FREQ, NUM_SYMBOLS};
pub use range_decoder::RangeDecoder;
pub use range_encoder::{RangeEncoder, FIRST_QTR, HALF, THIRD_QTR, TOP};
pub use shannon_entropy::shannon_entropy;
pub use status::{CodecError, Result};
