//! Core type definitions for describing record fields.

use std::fmt;

use serde::Serialize;

/// Semantic type of a record field.
///
/// The set is closed: every built-in coercion is one variant, and anything
/// else goes through `Custom`, which names the type so a caller-supplied
/// converter can be looked up for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    /// UTF-8 text, stored as-is.
    Text,
    /// Date-time with offset.
    Timestamp,
    /// A caller-defined type, identified by name.
    Custom(&'static str),
}

impl FieldType {
    /// Returns true for signed integer types.
    pub fn is_signed_integer(&self) -> bool {
        matches!(
            self,
            FieldType::I8 | FieldType::I16 | FieldType::I32 | FieldType::I64 | FieldType::Isize
        )
    }

    /// Returns true for unsigned integer types.
    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            FieldType::U8 | FieldType::U16 | FieldType::U32 | FieldType::U64 | FieldType::Usize
        )
    }

    /// Returns true for types handled by a caller-supplied converter.
    pub fn is_custom(&self) -> bool {
        matches!(self, FieldType::Custom(_))
    }

    /// Inclusive range of a signed integer type.
    pub(crate) fn signed_bounds(&self) -> Option<(i64, i64)> {
        match self {
            FieldType::I8 => Some((i8::MIN.into(), i8::MAX.into())),
            FieldType::I16 => Some((i16::MIN.into(), i16::MAX.into())),
            FieldType::I32 => Some((i32::MIN.into(), i32::MAX.into())),
            FieldType::I64 => Some((i64::MIN, i64::MAX)),
            FieldType::Isize => Some((isize::MIN as i64, isize::MAX as i64)),
            _ => None,
        }
    }

    /// Maximum of an unsigned integer type.
    pub(crate) fn unsigned_max(&self) -> Option<u64> {
        match self {
            FieldType::U8 => Some(u8::MAX.into()),
            FieldType::U16 => Some(u16::MAX.into()),
            FieldType::U32 => Some(u32::MAX.into()),
            FieldType::U64 => Some(u64::MAX),
            FieldType::Usize => Some(usize::MAX as u64),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::I8 => "i8",
            FieldType::I16 => "i16",
            FieldType::I32 => "i32",
            FieldType::I64 => "i64",
            FieldType::Isize => "isize",
            FieldType::U8 => "u8",
            FieldType::U16 => "u16",
            FieldType::U32 => "u32",
            FieldType::U64 => "u64",
            FieldType::Usize => "usize",
            FieldType::F32 => "f32",
            FieldType::F64 => "f64",
            FieldType::Bool => "bool",
            FieldType::Text => "String",
            FieldType::Timestamp => "DateTime",
            FieldType::Custom(name) => name,
        };
        f.write_str(name)
    }
}
