//! Decode configuration and its normalization.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::ReaderOptions;
use crate::schema::FieldType;

/// How malformed timestamp cells interact with `ignore_field_type_errors`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// A malformed timestamp always fails the row, even when type errors
    /// are otherwise ignored.
    #[default]
    AlwaysReport,
    /// Timestamps follow `ignore_field_type_errors` like every other type.
    FollowFlag,
}

/// How header labels are matched to record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Label equals the field's identity name (case-sensitive).
    FieldNames,
    /// Label is one of the field's declared aliases.
    Aliases,
}

/// Decode configuration, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Skip columns that match no field instead of failing.
    pub ignore_unknown_fields: bool,
    /// Leave fields at their default when a cell cannot be converted.
    pub ignore_field_type_errors: bool,
    /// Match labels against field identity names.
    pub use_field_names: bool,
    /// Match labels against field aliases.
    pub use_aliases: bool,
    /// Timestamp error handling.
    pub timestamp_errors: TimestampPolicy,
    /// Options for the CSV reader.
    pub reader: ReaderOptions,
}

impl DecodeOptions {
    /// Create options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set whether unknown columns are skipped.
    pub fn with_ignore_unknown_fields(mut self, ignore: bool) -> Self {
        self.ignore_unknown_fields = ignore;
        self
    }

    /// Set whether conversion failures are swallowed.
    pub fn with_ignore_field_type_errors(mut self, ignore: bool) -> Self {
        self.ignore_field_type_errors = ignore;
        self
    }

    /// Request identity-name matching.
    pub fn with_field_names(mut self) -> Self {
        self.use_field_names = true;
        self
    }

    /// Request alias matching.
    pub fn with_aliases(mut self) -> Self {
        self.use_aliases = true;
        self
    }

    /// Set the timestamp error policy.
    pub fn with_timestamp_errors(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_errors = policy;
        self
    }

    /// Set the reader options.
    pub fn with_reader(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }

    /// Resolve the options into the settings a decode actually uses.
    pub fn normalize(&self) -> EffectiveOptions {
        normalize(self)
    }
}

/// The settings in force for one decode, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveOptions {
    /// The single resolution mode in force.
    pub mode: ResolutionMode,
    /// Skip columns that match no field.
    pub ignore_unknown_fields: bool,
    /// Swallow conversion failures the timestamp policy allows.
    pub ignore_field_type_errors: bool,
    /// Timestamp error handling.
    pub timestamp_errors: TimestampPolicy,
}

impl EffectiveOptions {
    /// Whether a conversion failure for a field of `field_type` is swallowed.
    pub fn tolerates(&self, field_type: FieldType) -> bool {
        if !self.ignore_field_type_errors {
            return false;
        }
        !(field_type == FieldType::Timestamp
            && self.timestamp_errors == TimestampPolicy::AlwaysReport)
    }
}

/// Pick exactly one resolution mode.
///
/// Identity-name matching is used when neither mode or both modes are
/// requested; alias matching only when it is the sole request.
pub fn normalize(options: &DecodeOptions) -> EffectiveOptions {
    let mode = if options.use_aliases && !options.use_field_names {
        ResolutionMode::Aliases
    } else {
        ResolutionMode::FieldNames
    };

    EffectiveOptions {
        mode,
        ignore_unknown_fields: options.ignore_unknown_fields,
        ignore_field_type_errors: options.ignore_field_type_errors,
        timestamp_errors: options.timestamp_errors,
    }
}
