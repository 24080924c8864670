//! Static schema description of decodable record types.

mod column;
mod record;
mod table;
mod types;

pub use column::FieldDescriptor;
pub use record::{FieldValue, Record, Value};
pub use table::Schema;
pub use types::FieldType;
