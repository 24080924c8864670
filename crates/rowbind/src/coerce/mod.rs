//! String to typed value coercion.

mod builtin;
mod registry;

pub use builtin::{coerce_builtin, parse_bool, parse_float, parse_signed, parse_timestamp, parse_unsigned};
pub use registry::{CoerceFailure, ConvertFn, Conversions};
