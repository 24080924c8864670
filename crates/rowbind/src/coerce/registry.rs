//! The conversion function table.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::builtin::coerce_builtin;
use crate::error::CoercionError;
use crate::schema::{FieldType, FieldValue, Value};

/// A caller-supplied converter, type-erased.
pub type ConvertFn = dyn Fn(&str) -> Result<Box<dyn Any + Send>, CoercionError> + Send + Sync;

/// Why [`Conversions::coerce`] produced no value.
#[derive(Debug)]
pub enum CoerceFailure {
    /// The text is not a valid value of the type.
    Invalid(CoercionError),
    /// No converter exists for the type.
    Unsupported,
}

/// Maps field types to converters.
///
/// Built-in types are always handled by [`coerce_builtin`]; this table only
/// holds converters for `FieldType::Custom` types. It is read-only while a
/// decode runs and can be shared across threads.
#[derive(Clone, Default)]
pub struct Conversions {
    custom: IndexMap<FieldType, Arc<ConvertFn>>,
}

impl Conversions {
    /// Create a table with no custom converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter for `T`, keyed by `T::FIELD_TYPE`.
    ///
    /// A later registration for the same type replaces the earlier one.
    /// Registrations for built-in types are ignored.
    pub fn register<T, E, F>(&mut self, convert: F)
    where
        T: FieldValue + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let field_type = T::FIELD_TYPE;
        if !field_type.is_custom() {
            tracing::warn!(%field_type, "ignoring converter registered for built-in type");
            return;
        }

        let erased = move |raw: &str| -> Result<Box<dyn Any + Send>, CoercionError> {
            match convert(raw) {
                Ok(value) => Ok(Box::new(value) as Box<dyn Any + Send>),
                Err(e) => Err(CoercionError::Custom(e.into())),
            }
        };
        self.custom.insert(field_type, Arc::new(erased));
    }

    /// Builder form of [`Conversions::register`].
    pub fn with<T, E, F>(mut self, convert: F) -> Self
    where
        T: FieldValue + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(convert);
        self
    }

    /// Check whether `field_type` can be converted.
    pub fn supports(&self, field_type: FieldType) -> bool {
        !field_type.is_custom() || self.custom.contains_key(&field_type)
    }

    /// Convert `raw` to a value of `field_type`.
    pub fn coerce(&self, field_type: FieldType, raw: &str) -> Result<Value, CoerceFailure> {
        if let Some(result) = coerce_builtin(field_type, raw) {
            return result.map_err(CoerceFailure::Invalid);
        }

        match self.custom.get(&field_type) {
            Some(convert) => convert(raw)
                .map(Value::Custom)
                .map_err(CoerceFailure::Invalid),
            None => Err(CoerceFailure::Unsupported),
        }
    }

    /// Custom types with a registered converter, in registration order.
    pub fn custom_types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.custom.keys().copied()
    }

    /// Number of custom converters.
    pub fn len(&self) -> usize {
        self.custom.len()
    }

    /// Check whether no custom converter is registered.
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }
}

impl fmt::Debug for Conversions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversions")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}
