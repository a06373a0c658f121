//! Input data model: differences reported by the external comparator.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One side of a difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Other(String),
}

impl Value {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Timestamp(_))
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Numeric view of the value. Text is parsed leniently.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) | Self::Other(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Short name of the value kind, used when comparing shapes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::Other(_) => "other",
        }
    }

    /// Whether two values share a kind (integers and floats are both numbers).
    pub fn same_kind(&self, other: &Value) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Other(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

/// A single field-level mismatch between two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub property_path: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

impl Difference {
    pub fn new(
        property_path: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            old_value,
            new_value,
        }
    }

    /// Both sides present with differing values.
    pub fn changed(
        property_path: impl Into<String>,
        old_value: impl Into<Value>,
        new_value: impl Into<Value>,
    ) -> Self {
        Self::new(property_path, Some(old_value.into()), Some(new_value.into()))
    }

    /// Present in the expected document, absent from the actual one.
    pub fn removed(property_path: impl Into<String>, old_value: impl Into<Value>) -> Self {
        Self::new(property_path, Some(old_value.into()), None)
    }

    /// Absent from the expected document, present in the actual one.
    pub fn added(property_path: impl Into<String>, new_value: impl Into<Value>) -> Self {
        Self::new(property_path, None, Some(new_value.into()))
    }

    /// Either side absent.
    pub fn is_missing(&self) -> bool {
        self.old_value.is_none() || self.new_value.is_none()
    }

    pub fn both_present(&self) -> bool {
        !self.is_missing()
    }

    /// Both values, when present on both sides.
    pub fn values(&self) -> Option<(&Value, &Value)> {
        match (&self.old_value, &self.new_value) {
            (Some(old), Some(new)) => Some((old, new)),
            _ => None,
        }
    }

    /// Canonical `(old, new)` string pair; absent sides render as `null`.
    pub fn value_pair(&self) -> (String, String) {
        let render = |v: &Option<Value>| v.as_ref().map_or_else(|| "null".to_string(), |v| v.to_string());
        (render(&self.old_value), render(&self.new_value))
    }
}

/// Result of comparing one pair of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilePairResult {
    pub file1_name: String,
    pub file2_name: String,
    pub are_equal: bool,
    #[serde(default)]
    pub differences: Vec<Difference>,
}

impl FilePairResult {
    /// Build a result; equality is derived from the difference list.
    pub fn new(
        file1_name: impl Into<String>,
        file2_name: impl Into<String>,
        differences: Vec<Difference>,
    ) -> Self {
        Self {
            file1_name: file1_name.into(),
            file2_name: file2_name.into(),
            are_equal: differences.is_empty(),
            differences,
        }
    }

    /// Identifier of the pair inside an analysis run.
    pub fn file_id(&self) -> &str {
        &self.file1_name
    }

    pub fn has_differences(&self) -> bool {
        !self.are_equal
    }
}

/// All pair results of one folder comparison. The engine's sole input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderResult {
    #[serde(default)]
    pub file_pair_results: Vec<FilePairResult>,
}

impl FolderResult {
    pub fn new(file_pair_results: Vec<FilePairResult>) -> Self {
        Self { file_pair_results }
    }

    /// Pairs reported as not equal.
    pub fn files_with_differences(&self) -> impl Iterator<Item = &FilePairResult> {
        self.file_pair_results.iter().filter(|r| r.has_differences())
    }

    pub fn total_differences(&self) -> usize {
        self.file_pair_results.iter().map(|r| r.differences.len()).sum()
    }

    /// Parse a folder result from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
