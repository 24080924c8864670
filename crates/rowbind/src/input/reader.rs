//! CSV reader adapter producing a header row and data rows.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};

/// How many fields each row must have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCount {
    /// Every row must have as many fields as the header.
    #[default]
    Header,
    /// Every row, header included, must have exactly this many fields.
    Exact(usize),
    /// Rows may have any number of fields.
    Any,
}

/// Reader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Field delimiter.
    pub delimiter: char,
    /// Quote character.
    pub quote: char,
    /// Lines starting with this character are skipped (None = no comments).
    pub comment: Option<char>,
    /// Strip leading whitespace from every field.
    pub trim_leading_space: bool,
    /// Field count enforcement.
    pub fields_per_record: FieldCount,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            comment: None,
            trim_leading_space: false,
            fields_per_record: FieldCount::Header,
        }
    }
}

impl ReaderOptions {
    /// Build a `csv` reader over `rdr` with these options.
    pub fn build<R: Read>(&self, rdr: R) -> Result<csv::Reader<R>> {
        let comment = self.comment.map(|c| ascii_byte(c, "comment")).transpose()?;

        Ok(csv::ReaderBuilder::new()
            .delimiter(ascii_byte(self.delimiter, "delimiter")?)
            .quote(ascii_byte(self.quote, "quote")?)
            .comment(comment)
            .has_headers(false)
            .flexible(self.fields_per_record != FieldCount::Header)
            .from_reader(rdr))
    }
}

/// Pulls the header and then data rows from a CSV input.
pub struct RowSource<R: Read> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    trim_leading_space: bool,
    fields_per_record: FieldCount,
    row: usize,
}

impl<R: Read> RowSource<R> {
    /// Create a row source over `rdr`.
    pub fn new(rdr: R, options: &ReaderOptions) -> Result<Self> {
        Ok(Self {
            reader: options.build(rdr)?,
            record: csv::StringRecord::new(),
            trim_leading_space: options.trim_leading_space,
            fields_per_record: options.fields_per_record,
            row: 0,
        })
    }

    /// Read the next row; the first call returns the header.
    ///
    /// Returns `None` at end of input. Row numbers in errors count the
    /// header as row 0.
    pub fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        let row = self.row;
        self.row += 1;

        if let FieldCount::Exact(expected) = self.fields_per_record {
            if self.record.len() != expected {
                return Err(DecodeError::FieldCount {
                    row,
                    expected,
                    found: self.record.len(),
                });
            }
        }

        let fields = self
            .record
            .iter()
            .map(|field| {
                if self.trim_leading_space {
                    field.trim_start().to_string()
                } else {
                    field.to_string()
                }
            })
            .collect();

        Ok(Some(fields))
    }

    /// Number of rows read so far, header included.
    pub fn rows_read(&self) -> usize {
        self.row
    }
}

fn ascii_byte(c: char, what: &str) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(DecodeError::InvalidDelimiter(format!(
            "{what} character '{c}' is not ASCII"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(data: &str, options: &ReaderOptions) -> Result<Vec<Vec<String>>> {
        let mut source = RowSource::new(data.as_bytes(), options)?;
        let mut rows = Vec::new();
        while let Some(row) = source.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }

    #[test]
    fn test_read_csv() {
        let rows = read_all("name,age\nAlice,30\n\"Bob, Jr\",25\n", &ReaderOptions::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["name", "age"]);
        assert_eq!(rows[2], vec!["Bob, Jr", "25"]);
    }

    #[test]
    fn test_empty_input() {
        let rows = read_all("", &ReaderOptions::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_custom_delimiter_and_comment() {
        let options = ReaderOptions {
            delimiter: ';',
            comment: Some('#'),
            ..ReaderOptions::default()
        };
        let rows = read_all("a;b\n# skipped\n1;2\n", &options).unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_trim_leading_space() {
        let options = ReaderOptions {
            trim_leading_space: true,
            ..ReaderOptions::default()
        };
        let rows = read_all("a, b\n1,  2 \n", &options).unwrap();
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["1", "2 "]);
    }

    #[test]
    fn test_header_length_enforced() {
        let err = read_all("a,b\n1,2,3\n", &ReaderOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Csv(_)));
    }

    #[test]
    fn test_any_field_count() {
        let options = ReaderOptions {
            fields_per_record: FieldCount::Any,
            ..ReaderOptions::default()
        };
        let rows = read_all("a,b\n1\n1,2,3\n", &options).unwrap();
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 3);
    }

    #[test]
    fn test_exact_field_count() {
        let options = ReaderOptions {
            fields_per_record: FieldCount::Exact(2),
            ..ReaderOptions::default()
        };
        let err = read_all("a,b\n1,2\n3\n", &options).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldCount {
                row: 2,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let options = ReaderOptions {
            delimiter: '§',
            ..ReaderOptions::default()
        };
        assert!(matches!(
            RowSource::new("a".as_bytes(), &options),
            Err(DecodeError::InvalidDelimiter(_))
        ));
    }
}
