//! rowbind: decode CSV rows into statically typed records.
//!
//! A record type describes its fields once, at compile time, usually with the
//! [`record!`] macro. A [`Decoder`] then resolves a header row against those
//! fields and converts every cell to the field's type, following the policy in
//! [`DecodeOptions`] for unknown columns and malformed values.
//!
//! # Example
//!
//! ```
//! use rowbind::{DecodeOptions, Decoder};
//!
//! rowbind::record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Person {
//!         pub name: String as "Name",
//!         pub age: i32 as "Age",
//!         pub active: bool as "Active",
//!     }
//! }
//!
//! let decoder = Decoder::<Person>::with_options(&DecodeOptions::new()).unwrap();
//! let people = decoder.decode_str("Name,Age,Active\nAda,36,true\n").unwrap();
//!
//! assert_eq!(people[0].name, "Ada");
//! assert_eq!(people[0].age, 36);
//! ```

pub mod coerce;
pub mod decode;
pub mod error;
pub mod input;
pub mod schema;

pub use coerce::Conversions;
pub use decode::{
    decode_batch, decode_row, decode_str, DecodeOptions, Decoder, FieldMap, ResolutionMode,
    TimestampPolicy,
};
pub use error::{CoercionError, DecodeError, Result};
pub use input::{FieldCount, ReaderOptions};
pub use schema::{FieldDescriptor, FieldType, FieldValue, Record, Schema, Value};
