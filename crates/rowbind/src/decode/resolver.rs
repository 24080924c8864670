//! Header label to record field resolution.

use std::borrow::Cow;

use super::options::ResolutionMode;
use crate::schema::{FieldDescriptor, Schema};

/// A column's resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField {
    /// Position of the field in the record schema.
    pub position: usize,
    pub descriptor: &'static FieldDescriptor,
}

/// Column index to field mapping for one header row.
///
/// Built once per batch and reused for every row of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    labels: Vec<String>,
    fields: Vec<Option<ResolvedField>>,
}

impl FieldMap {
    /// Resolve every header label against `schema`.
    ///
    /// Labels that match no field stay unresolved; whether that is an error
    /// is decided per row by the decoder.
    pub fn resolve<I, S>(schema: &Schema, header: I, mode: ResolutionMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = header.into_iter().map(|s| s.as_ref().to_string()).collect();
        let fields = labels
            .iter()
            .map(|label| {
                let position = match mode {
                    ResolutionMode::FieldNames => schema.position_by_name(label),
                    ResolutionMode::Aliases => schema.position_by_alias(label),
                }?;
                Some(ResolvedField {
                    position,
                    descriptor: schema.field(position)?,
                })
            })
            .collect();

        let map = Self { labels, fields };
        tracing::debug!(
            ?mode,
            columns = map.len(),
            resolved = map.resolved_count(),
            "resolved header"
        );
        map
    }

    /// The field for `column`, if its label resolved.
    pub fn field(&self, column: usize) -> Option<&ResolvedField> {
        self.fields.get(column).and_then(|f| f.as_ref())
    }

    /// Label of `column`; columns past the header are named `column_N`.
    pub fn label(&self, column: usize) -> Cow<'_, str> {
        match self.labels.get(column) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(format!("column_{}", column + 1)),
        }
    }

    /// Labels that matched no field.
    pub fn unresolved_labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .zip(&self.fields)
            .filter(|(_, field)| field.is_none())
            .map(|(label, _)| label.as_str())
    }

    /// Number of header columns.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check whether the header had no columns.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of columns that resolved to a field.
    pub fn resolved_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_some()).count()
    }
}
