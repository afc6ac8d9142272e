//! Query semantics shared by `list` and `filter`.
//!
//! - [`Criteria`]: field equality constraints, ANDed together. A `null`
//!   criterion value means "no constraint".
//! - [`OrderBy`]: a field name, `-field` for descending.
//! - [`Query`]: optional order plus optional limit.
//!
//! Sorting is stable. Records missing the sort field (or holding `null`)
//! always sort after records that have it, whichever the direction. A field
//! holding values of several types groups them booleans first, then numbers,
//! strings, arrays and objects.

use crate::error::{CatedraError, Result};
use crate::model::Record;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Compare two records on this field.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let a = defined(a.get(&self.field));
        let b = defined(b.get(&self.field));

        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                if values_equal(a, b) {
                    return Ordering::Equal;
                }
                let ord = compare_defined(a, b);
                if self.descending {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    }
}

impl FromStr for OrderBy {
    type Err = CatedraError;

    fn from_str(s: &str) -> Result<Self> {
        let (field, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if field.is_empty() {
            return Err(CatedraError::InvalidInput(format!(
                "Invalid order field: '{}'",
                s
            )));
        }
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// Sort and truncation applied after selection.
///
/// `limit: None` means unlimited; `Some(0)` yields no records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub order: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn apply(&self, mut records: Vec<Record>) -> Vec<Record> {
        if let Some(order) = &self.order {
            // sort_by is stable: ties keep table order
            records.sort_by(|a, b| order.compare(a, b));
        }
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }
        records
    }
}

/// Equality constraints on record fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    terms: Vec<(String, Value)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            terms: map.into_iter().collect(),
        }
    }

    /// Parse `field=value` terms. Values that parse as JSON keep their type
    /// (`year=2024` is a number), anything else is taken as a plain string.
    pub fn parse_terms<I: AsRef<str>>(terms: &[I]) -> Result<Self> {
        let mut criteria = Self::new();
        for term in terms {
            let (field, value) = parse_assignment(term.as_ref())?;
            criteria.terms.push((field, value));
        }
        Ok(criteria)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[(String, Value)] {
        &self.terms
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.terms
            .iter()
            .filter(|(_, expected)| !expected.is_null())
            .all(|(field, expected)| {
                record
                    .get(field)
                    .map(|actual| values_equal(actual, expected))
                    .unwrap_or(false)
            })
    }
}

/// Split a `field=value` term.
pub fn parse_assignment(term: &str) -> Result<(String, Value)> {
    let (field, raw) = term.split_once('=').ok_or_else(|| {
        CatedraError::InvalidInput(format!("Expected field=value, got '{}'", term))
    })?;
    let field = field.trim();
    if field.is_empty() {
        return Err(CatedraError::InvalidInput(format!(
            "Missing field name in '{}'",
            term
        )));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((field.to_string(), value))
}

/// Strict equality, except that numbers compare by value (`1 == 1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => a == b,
    }
}

fn defined(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

// Total order over present values: values of different types order by type
// rank, and within a type by value. Strings compare by UTF-16 code units.
fn compare_defined(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.encode_utf16().cmp(b.encode_utf16()),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
