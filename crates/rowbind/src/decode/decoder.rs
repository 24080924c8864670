//! Row and batch decoding into records.

use std::io::Read;
use std::marker::PhantomData;

use super::options::{DecodeOptions, EffectiveOptions, ResolutionMode};
use super::resolver::FieldMap;
use crate::coerce::{CoerceFailure, Conversions};
use crate::error::{DecodeError, Result};
use crate::input::{ReaderOptions, RowSource};
use crate::schema::{FieldDescriptor, Record};

/// Decodes rows into records of type `T`.
///
/// A decoder is configured once and can then decode any number of rows or
/// batches. It holds no per-batch state, so a shared reference can be used
/// from several threads at the same time.
pub struct Decoder<T> {
    options: EffectiveOptions,
    reader: ReaderOptions,
    conversions: Conversions,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Decoder<T> {
    /// Create a decoder with custom conversions.
    ///
    /// Fails with [`DecodeError::UnsupportedType`] if `T` has a custom-typed
    /// field with no converter in `conversions`.
    pub fn new(options: &DecodeOptions, conversions: Conversions) -> Result<Self> {
        let schema = T::schema();
        if let Some(field) = schema
            .custom_fields()
            .find(|f| !conversions.supports(f.field_type))
        {
            return Err(unsupported(field));
        }

        let effective = options.normalize();
        if effective.mode == ResolutionMode::Aliases {
            for (alias, fields) in schema.duplicate_aliases() {
                tracing::warn!(alias, ?fields, "alias declared by several fields; first declared wins");
            }
        }

        tracing::debug!(
            record = std::any::type_name::<T>(),
            mode = ?effective.mode,
            custom = ?conversions.custom_types().collect::<Vec<_>>(),
            "decoder ready"
        );

        Ok(Self {
            options: effective,
            reader: options.reader.clone(),
            conversions,
            _record: PhantomData,
        })
    }

    /// Create a decoder with only the built-in conversions.
    pub fn with_options(options: &DecodeOptions) -> Result<Self> {
        Self::new(options, Conversions::new())
    }

    /// The normalized settings this decoder runs with.
    pub fn options(&self) -> &EffectiveOptions {
        &self.options
    }

    /// Resolve a header row against `T`'s schema.
    pub fn resolve<I, S>(&self, header: I) -> FieldMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FieldMap::resolve(&T::schema(), header, self.options.mode)
    }

    /// Decode one row using an already resolved header.
    ///
    /// Cells are applied in column order. Missing trailing cells leave their
    /// fields at the default value.
    pub fn decode_record<I, S>(&self, map: &FieldMap, row: I) -> Result<T>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut record = T::default();

        for (column, cell) in row.into_iter().enumerate() {
            let cell = cell.as_ref();
            let Some(resolved) = map.field(column) else {
                if self.options.ignore_unknown_fields {
                    continue;
                }
                return Err(DecodeError::UnknownField {
                    label: map.label(column).into_owned(),
                });
            };

            let field = resolved.descriptor;
            let outcome = match self.conversions.coerce(field.field_type, cell) {
                Ok(value) => record.set_field(resolved.position, value),
                Err(CoerceFailure::Invalid(cause)) => Err(cause),
                Err(CoerceFailure::Unsupported) => return Err(unsupported(field)),
            };

            if let Err(cause) = outcome {
                if self.options.tolerates(field.field_type) {
                    tracing::trace!(field = field.name, raw = cell, error = %cause, "ignoring field type error");
                    continue;
                }
                return Err(DecodeError::Conversion {
                    field: field.name.to_string(),
                    field_type: field.field_type,
                    raw_value: cell.to_string(),
                    cause,
                });
            }
        }

        Ok(record)
    }

    /// Decode a single row against its header.
    pub fn decode_row<H, HS, R, RS>(&self, header: H, row: R) -> Result<T>
    where
        H: IntoIterator<Item = HS>,
        HS: AsRef<str>,
        R: IntoIterator<Item = RS>,
        RS: AsRef<str>,
    {
        let map = self.resolve(header);
        self.decode_record(&map, row)
    }

    /// Decode every row, in order, stopping at the first error.
    pub fn decode_batch<H, HS, Rows, R, S>(&self, header: H, rows: Rows) -> Result<Vec<T>>
    where
        H: IntoIterator<Item = HS>,
        HS: AsRef<str>,
        Rows: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let map = self.resolve(header);
        self.decode_resolved(&map, rows.into_iter().map(Ok))
    }

    /// Read CSV text and decode every data row.
    pub fn decode_str(&self, input: &str) -> Result<Vec<T>> {
        self.decode_reader(input.as_bytes())
    }

    /// Read CSV from `rdr` and decode every data row.
    ///
    /// Input with no rows at all, not even a header, decodes to an empty
    /// list.
    pub fn decode_reader<R: Read>(&self, rdr: R) -> Result<Vec<T>> {
        let mut source = RowSource::new(rdr, &self.reader)?;
        let Some(header) = source.next_row()? else {
            return Ok(Vec::new());
        };

        let map = self.resolve(&header);
        let records =
            self.decode_resolved(&map, std::iter::from_fn(|| source.next_row().transpose()))?;
        tracing::debug!(rows_read = source.rows_read(), "input exhausted");
        Ok(records)
    }

    fn decode_resolved<I, R, S>(&self, map: &FieldMap, rows: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = Result<R>>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let record = row
                .and_then(|row| self.decode_record(map, row))
                .inspect_err(|e| tracing::debug!(row = index + 1, error = %e, "batch aborted"))?;
            records.push(record);
        }

        tracing::debug!(records = records.len(), "decoded batch");
        Ok(records)
    }
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            reader: self.reader.clone(),
            conversions: self.conversions.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Decoder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("record", &std::any::type_name::<T>())
            .field("options", &self.options)
            .field("reader", &self.reader)
            .field("conversions", &self.conversions)
            .finish()
    }
}

/// Decode a batch of rows with the built-in conversions only.
pub fn decode_batch<T, H, HS, Rows, R, S>(
    options: &DecodeOptions,
    header: H,
    rows: Rows,
) -> Result<Vec<T>>
where
    T: Record,
    H: IntoIterator<Item = HS>,
    HS: AsRef<str>,
    Rows: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Decoder::<T>::with_options(options)?.decode_batch(header, rows)
}

/// Decode one row with the built-in conversions only.
pub fn decode_row<T, H, HS, R, RS>(options: &DecodeOptions, header: H, row: R) -> Result<T>
where
    T: Record,
    H: IntoIterator<Item = HS>,
    HS: AsRef<str>,
    R: IntoIterator<Item = RS>,
    RS: AsRef<str>,
{
    Decoder::<T>::with_options(options)?.decode_row(header, row)
}

/// Read CSV text and decode it with the built-in conversions only.
pub fn decode_str<T: Record>(options: &DecodeOptions, input: &str) -> Result<Vec<T>> {
    Decoder::<T>::with_options(options)?.decode_str(input)
}

fn unsupported(field: &FieldDescriptor) -> DecodeError {
    DecodeError::UnsupportedType {
        field: field.name.to_string(),
        field_type: field.field_type,
    }
}
