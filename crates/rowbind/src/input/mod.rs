//! Input reading: the boundary with the CSV tokenizer.

mod reader;

pub use reader::{FieldCount, ReaderOptions, RowSource};
