//! Header resolution and record decoding.

mod decoder;
mod options;
mod resolver;

pub use decoder::{decode_batch, decode_row, decode_str, Decoder};
pub use options::{normalize, DecodeOptions, EffectiveOptions, ResolutionMode, TimestampPolicy};
pub use resolver::{FieldMap, ResolvedField};
