//! Typed values and the traits that let a struct receive them.

use std::any::Any;

use chrono::{DateTime, FixedOffset, Utc};

use super::table::Schema;
use super::types::FieldType;
use crate::error::CoercionError;

/// A coerced cell, ready to be stored in a record field.
#[derive(Debug)]
pub enum Value {
    /// Any signed integer, already range-checked for the target width.
    Int(i64),
    /// Any unsigned integer, already range-checked for the target width.
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Timestamp(DateTime<FixedOffset>),
    /// Output of a caller-supplied converter.
    Custom(Box<dyn Any + Send>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::Custom(_) => "custom",
        }
    }

    /// Error describing this value being offered to a field of type `expected`.
    pub fn mismatch(&self, expected: FieldType) -> CoercionError {
        CoercionError::Mismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Unwrap a custom value into its concrete type.
    pub fn into_custom<T: Any>(self, expected: FieldType) -> Result<T, CoercionError> {
        match self {
            Value::Custom(boxed) => boxed.downcast::<T>().map(|v| *v).map_err(|_| {
                CoercionError::Mismatch {
                    expected,
                    found: "custom",
                }
            }),
            other => Err(other.mismatch(expected)),
        }
    }
}

/// A Rust type that can be the type of a record field.
///
/// Implement this for your own types with `FieldType::Custom("Name")` and
/// [`Value::into_custom`], then register a converter for them in
/// [`Conversions`](crate::Conversions).
pub trait FieldValue: Sized {
    /// The semantic type that selects the converter.
    const FIELD_TYPE: FieldType;

    /// Take ownership of a converted value.
    fn from_value(value: Value) -> Result<Self, CoercionError>;
}

macro_rules! signed_field_value {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::$tag;

            fn from_value(value: Value) -> Result<Self, CoercionError> {
                match value {
                    Value::Int(v) => <$ty>::try_from(v).map_err(|_| CoercionError::OutOfRange {
                        value: v.to_string(),
                        target: Self::FIELD_TYPE,
                    }),
                    other => Err(other.mismatch(Self::FIELD_TYPE)),
                }
            }
        }
    )*};
}

macro_rules! unsigned_field_value {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::$tag;

            fn from_value(value: Value) -> Result<Self, CoercionError> {
                match value {
                    Value::UInt(v) => <$ty>::try_from(v).map_err(|_| CoercionError::OutOfRange {
                        value: v.to_string(),
                        target: Self::FIELD_TYPE,
                    }),
                    other => Err(other.mismatch(Self::FIELD_TYPE)),
                }
            }
        }
    )*};
}

signed_field_value!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
unsigned_field_value!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl FieldValue for f64 {
    const FIELD_TYPE: FieldType = FieldType::F64;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(other.mismatch(Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for f32 {
    const FIELD_TYPE: FieldType = FieldType::F32;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Float(v) => Ok(v as f32),
            other => Err(other.mismatch(Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for bool {
    const FIELD_TYPE: FieldType = FieldType::Bool;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(other.mismatch(Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for String {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(other.mismatch(Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for DateTime<FixedOffset> {
    const FIELD_TYPE: FieldType = FieldType::Timestamp;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Timestamp(v) => Ok(v),
            other => Err(other.mismatch(Self::FIELD_TYPE)),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    const FIELD_TYPE: FieldType = FieldType::Timestamp;

    fn from_value(value: Value) -> Result<Self, CoercionError> {
        match value {
            Value::Timestamp(v) => Ok(v.with_timezone(&Utc)),
            other => Err(other.mismatch(Self::FIELD_TYPE)),
        }
    }
}

/// A struct that rows can be decoded into.
///
/// Usually generated with [`record!`](crate::record). Fields not written by
/// a row keep their `Default` value.
pub trait Record: Default {
    /// The field set, in declaration order.
    fn schema() -> Schema;

    /// Store `value` in the field at `index` of [`Record::schema`].
    fn set_field(&mut self, index: usize, value: Value) -> Result<(), CoercionError>;
}

/// Declare a struct together with its [`Record`] implementation.
///
/// Each field may override its identity name with `as "Label"` (the Rust
/// identifier is used otherwise) and declare alias labels with
/// `=> ["a", "b"]`. The struct must implement `Default`.
///
/// ```
/// rowbind::record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         pub name: String as "Name" => ["full_name"],
///         pub age: u8 as "Age",
///         pub active: bool,
///     }
/// }
///
/// use rowbind::Record;
/// assert_eq!(Person::schema().names(), vec!["Name", "Age", "active"]);
/// ```
#[macro_export]
macro_rules! record {
    (@name $field:ident $label:literal) => { $label };
    (@name $field:ident) => { stringify!($field) };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(as $label:literal)? $(=> [$($alias:literal),* $(,)?])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn schema() -> $crate::Schema {
                const FIELDS: &[$crate::FieldDescriptor] = &[
                    $(
                        $crate::FieldDescriptor::new(
                            $crate::record!(@name $field $($label)?),
                            <$ty as $crate::FieldValue>::FIELD_TYPE,
                        )
                        .with_aliases(&[$($($alias),*)?]),
                    )*
                ];
                $crate::Schema::new(FIELDS)
            }

            fn set_field(
                &mut self,
                index: usize,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::CoercionError> {
                let mut _position = 0usize;
                $(
                    if index == _position {
                        self.$field = <$ty as $crate::FieldValue>::from_value(value)?;
                        return Ok(());
                    }
                    _position += 1;
                )*
                Err($crate::CoercionError::NoSuchField(index))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl FieldValue for Point {
        const FIELD_TYPE: FieldType = FieldType::Custom("Point");

        fn from_value(value: Value) -> Result<Self, CoercionError> {
            value.into_custom(Self::FIELD_TYPE)
        }
    }

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Sample {
            id: u32 as "ID" => ["id", "sample_id"],
            label: String,
            origin: Point as "Origin",
        }
    }

    #[test]
    fn test_narrowing_is_checked() {
        assert_eq!(i8::from_value(Value::Int(-128)).unwrap(), -128);
        assert!(matches!(
            i8::from_value(Value::Int(128)),
            Err(CoercionError::OutOfRange { .. })
        ));
        assert!(matches!(
            u8::from_value(Value::Int(1)),
            Err(CoercionError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_custom_downcast() {
        let value = Value::Custom(Box::new(Point { x: 1, y: 2 }));
        assert_eq!(Point::from_value(value).unwrap(), Point { x: 1, y: 2 });

        let wrong = Value::Custom(Box::new(7u8));
        assert!(Point::from_value(wrong).is_err());
    }

    #[test]
    fn test_macro_schema() {
        let schema = Sample::schema();
        assert_eq!(schema.names(), vec!["ID", "label", "Origin"]);
        assert_eq!(schema.field_type(0), Some(FieldType::U32));
        assert_eq!(schema.field_type(2), Some(FieldType::Custom("Point")));
        assert_eq!(schema.position_by_alias("sample_id"), Some(0));
    }

    #[test]
    fn test_macro_set_field() {
        let mut sample = Sample::default();
        sample.set_field(0, Value::UInt(42)).unwrap();
        sample.set_field(1, Value::Text("a".to_string())).unwrap();
        assert_eq!(sample.id, 42);
        assert_eq!(sample.label, "a");

        sample
            .set_field(2, Value::Custom(Box::new(Point { x: 3, y: 4 })))
            .unwrap();
        assert_eq!(sample.origin, Point { x: 3, y: 4 });
        assert!(matches!(
            sample.set_field(3, Value::Bool(true)),
            Err(CoercionError::NoSuchField(3))
        ));
    }
}
