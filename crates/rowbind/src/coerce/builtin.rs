//! Built-in string to value conversions.
//!
//! Integer parsing is deliberately forgiving about representation: a sign,
//! a `0x`/`0o`/`0b` radix prefix, `_` digit separators and an all-zero
//! fractional part (`"3.0"`) are all accepted. Everything else about the
//! value must be exact, and the result must fit the target width.
//!
//! A leading zero does not select octal: `"010"` and `"0_10"` are both 10.
//! Use an explicit `0o` prefix for octal input.
//!
//! Timestamps have a single wire format, RFC 3339 with an uppercase `T`
//! separator and either an uppercase `Z` or a `±hh:mm` offset.

use chrono::{DateTime, FixedOffset};

use crate::error::CoercionError;
use crate::schema::{FieldType, Value};

/// Convert `raw` to a value of a built-in type.
///
/// Returns `None` for `FieldType::Custom`, which has no built-in converter.
pub fn coerce_builtin(field_type: FieldType, raw: &str) -> Option<Result<Value, CoercionError>> {
    let result = match field_type {
        t if t.is_signed_integer() => parse_signed(raw, t).map(Value::Int),
        t if t.is_unsigned_integer() => parse_unsigned(raw, t).map(Value::UInt),
        FieldType::F32 | FieldType::F64 => parse_float(raw).map(Value::Float),
        FieldType::Bool => parse_bool(raw).map(Value::Bool),
        FieldType::Text => Ok(Value::Text(raw.to_string())),
        FieldType::Timestamp => parse_timestamp(raw).map(Value::Timestamp),
        _ => return None,
    };
    Some(result)
}

/// Parse a signed integer and check it against the range of `target`.
pub fn parse_signed(raw: &str, target: FieldType) -> Result<i64, CoercionError> {
    let (negative, magnitude) = parse_integer_parts(raw, target)?;
    let magnitude = i128::try_from(magnitude).map_err(|_| out_of_range(raw, target))?;
    let value = if negative { -magnitude } else { magnitude };

    let (min, max) = target.signed_bounds().unwrap_or((i64::MIN, i64::MAX));
    if value < i128::from(min) || value > i128::from(max) {
        return Err(out_of_range(raw, target));
    }
    Ok(value as i64)
}

/// Parse an unsigned integer and check it against the range of `target`.
pub fn parse_unsigned(raw: &str, target: FieldType) -> Result<u64, CoercionError> {
    let (negative, magnitude) = parse_integer_parts(raw, target)?;
    if negative && magnitude != 0 {
        return Err(out_of_range(raw, target));
    }

    let max = target.unsigned_max().unwrap_or(u64::MAX);
    if magnitude > u128::from(max) {
        return Err(out_of_range(raw, target));
    }
    Ok(magnitude as u64)
}

/// Parse a floating point number.
pub fn parse_float(raw: &str) -> Result<f64, CoercionError> {
    if raw.is_empty() {
        return Err(CoercionError::Empty);
    }
    Ok(raw.parse::<f64>()?)
}

/// Parse one of the accepted boolean spellings.
pub fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        "" => Err(CoercionError::Empty),
        _ => Err(CoercionError::InvalidBool),
    }
}

/// Parse an RFC 3339 timestamp, e.g. `2024-03-01T12:30:00+02:00`.
///
/// The date and time must be separated by `T` and a UTC suffix must be
/// `Z`; the lowercase and space-separated forms are rejected.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, CoercionError> {
    if raw.is_empty() {
        return Err(CoercionError::Empty);
    }
    let separator = raw.as_bytes().get(10).copied();
    if matches!(separator, Some(b) if b != b'T') || raw.ends_with('z') {
        return Err(CoercionError::TimestampLayout);
    }
    Ok(DateTime::parse_from_rfc3339(raw)?)
}

/// Split an integer literal into its sign and magnitude.
fn parse_integer_parts(raw: &str, target: FieldType) -> Result<(bool, u128), CoercionError> {
    if raw.is_empty() {
        return Err(CoercionError::Empty);
    }

    let (negative, unsigned) = match raw.as_bytes()[0] {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits = trim_zero_fraction(unsigned)?;

    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ => (10, digits),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return Err(CoercionError::InvalidInteger);
    }

    let mut magnitude: u128 = 0;
    for ch in digits.chars().filter(|c| *c != '_') {
        let digit = ch.to_digit(radix).ok_or(CoercionError::InvalidInteger)?;
        magnitude = magnitude
            .checked_mul(u128::from(radix))
            .and_then(|m| m.checked_add(u128::from(digit)))
            .ok_or_else(|| out_of_range(raw, target))?;
    }

    Ok((negative, magnitude))
}

/// Drop a fractional part made only of zeros; reject any other fraction.
fn trim_zero_fraction(s: &str) -> Result<&str, CoercionError> {
    match s.split_once('.') {
        None => Ok(s),
        Some((int, frac)) if !int.is_empty() && !frac.is_empty() && frac.bytes().all(|b| b == b'0') => {
            Ok(int)
        }
        Some(_) => Err(CoercionError::InvalidInteger),
    }
}

fn out_of_range(raw: &str, target: FieldType) -> CoercionError {
    CoercionError::OutOfRange {
        value: raw.to_string(),
        target,
    }
}
