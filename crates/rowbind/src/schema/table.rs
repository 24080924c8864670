//! Record-level schema view.

use super::column::FieldDescriptor;
use super::types::FieldType;

/// The ordered field set of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    fields: &'static [FieldDescriptor],
}

impl Schema {
    /// Wrap a static field list.
    pub const fn new(fields: &'static [FieldDescriptor]) -> Self {
        Self { fields }
    }

    /// All field descriptors, in declaration order.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Get a field by position.
    pub fn field(&self, index: usize) -> Option<&'static FieldDescriptor> {
        self.fields.get(index)
    }

    /// Position of the field whose identity name equals `label` exactly.
    pub fn position_by_name(&self, label: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == label)
    }

    /// Position of the first declared field listing `label` as an alias.
    pub fn position_by_alias(&self, label: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.has_alias(label))
    }

    /// Aliases declared by more than one field, with every declaring field name.
    pub fn duplicate_aliases(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        let mut duplicates: Vec<(&'static str, Vec<&'static str>)> = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            for alias in field.aliases {
                if duplicates.iter().any(|(a, _)| a == alias) {
                    continue;
                }
                let owners: Vec<&'static str> = self.fields[i..]
                    .iter()
                    .filter(|f| f.has_alias(alias))
                    .map(|f| f.name)
                    .collect();
                if owners.len() > 1 {
                    duplicates.push((*alias, owners));
                }
            }
        }
        duplicates
    }

    /// Fields whose type is handled by a caller-supplied converter.
    pub fn custom_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.field_type.is_custom())
    }

    /// Type of the field at `index`.
    pub fn field_type(&self, index: usize) -> Option<FieldType> {
        self.field(index).map(|f| f.field_type)
    }

    /// Get all field names.
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
