//! Record and field value types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scalar field value.
///
/// The enum is externally tagged so the persisted documents artifact keeps
/// full type fidelity: a date loads back as a date, not as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Free text.
    Text(String),

    /// Numeric value (salaries, ages, tenure).
    Number(f64),

    /// Calendar date (hire date, date of birth).
    Date(NaiveDate),

    /// Explicitly absent value.
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Null => Ok(()),
        }
    }
}

/// One source row: a mapping from field name to scalar value.
///
/// Records are immutable after ingestion and identified by their position in
/// the backing sequence; that position is the join key to the rendered
/// document and the indexed vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any existing value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Builder-style variant of [`Record::set`].
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Render a field for display.
    ///
    /// Missing and null fields render as the empty string, never as the
    /// literal word "None" or "null".
    pub fn display(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
