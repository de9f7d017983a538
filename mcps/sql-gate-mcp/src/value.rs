//! Scalar values crossing the database boundary
//!
//! Every cell read from a cursor and every bind parameter is a [`SqlValue`].
//! Drivers map their native values onto it using the [`ColumnKind`] of the
//! column's declared type.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Format used when a date-time is rendered as text
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A nullable scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Binary(Vec<u8>),
}

impl SqlValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of the value, accepting integral floats
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(i) => Some(*i),
            SqlValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Parse a textual date or date-time in the common SQL layouts
    pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null => serializer.serialize_none(),
            SqlValue::Text(s) => serializer.serialize_str(s),
            SqlValue::Integer(i) => serializer.serialize_i64(*i),
            // JSON has no NaN/Infinity
            SqlValue::Float(f) if !f.is_finite() => serializer.serialize_none(),
            SqlValue::Float(f) => serializer.serialize_f64(*f),
            SqlValue::Boolean(b) => serializer.serialize_bool(*b),
            SqlValue::DateTime(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
            SqlValue::Binary(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
        }
    }
}

// ============================================================================
// Column type mapping
// ============================================================================

/// Largest integer magnitude an `f64` represents exactly
const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

/// Logical kind of a column, derived from its declared type name
///
/// Drivers that only report a storage class use this to recover booleans and
/// date-times. Unknown declarations leave the storage class in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    DateTime,
    Integer,
    Float,
    Text,
    Binary,
    Unknown,
}

impl ColumnKind {
    pub fn from_declared(declared: Option<&str>) -> Self {
        let Some(declared) = declared else {
            return ColumnKind::Unknown;
        };
        let upper = declared.to_ascii_uppercase();

        if upper.contains("BOOL") || upper == "BIT" {
            ColumnKind::Boolean
        } else if upper.contains("DATE") || upper.contains("TIME") {
            ColumnKind::DateTime
        } else if upper.contains("INT") {
            ColumnKind::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            ColumnKind::Text
        } else if upper.contains("BLOB") || upper.contains("BINARY") {
            ColumnKind::Binary
        } else if ["REAL", "FLOA", "DOUB", "DEC", "NUMERIC", "MONEY"]
            .iter()
            .any(|k| upper.contains(k))
        {
            ColumnKind::Float
        } else {
            ColumnKind::Unknown
        }
    }

    /// Refine a raw driver value according to this column kind
    pub fn refine(self, value: SqlValue) -> SqlValue {
        match (self, value) {
            (ColumnKind::Boolean, SqlValue::Integer(i)) => SqlValue::Boolean(i != 0),
            (ColumnKind::DateTime, SqlValue::Text(s)) => match SqlValue::parse_datetime(&s) {
                Some(dt) => SqlValue::DateTime(dt),
                None => SqlValue::Text(s),
            },
            // Beyond 2^53 an f64 cannot hold the integer exactly
            (ColumnKind::Float, SqlValue::Integer(i))
                if i.unsigned_abs() <= MAX_EXACT_FLOAT_INT =>
            {
                SqlValue::Float(i as f64)
            }
            (_, value) => value,
        }
    }
}
