//! Static description of a single record field.

use serde::Serialize;

use super::types::FieldType;

/// Describes one field of a record type.
///
/// Descriptors are `'static` and const-constructible so that a record's
/// whole schema can live in a `const` slice generated next to the struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Identity name, matched against header labels in field-name mode.
    pub name: &'static str,
    /// Semantic type used to pick a converter.
    pub field_type: FieldType,
    /// Alternative labels, matched in alias mode.
    pub aliases: &'static [&'static str],
}

impl FieldDescriptor {
    /// Create a descriptor without aliases.
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            aliases: &[],
        }
    }

    /// Attach alias labels.
    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Check whether this field declares `label` as an alias.
    pub fn has_alias(&self, label: &str) -> bool {
        self.aliases.iter().any(|a| *a == label)
    }
}
