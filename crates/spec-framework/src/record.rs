//! # Records & Values
//!
//! The executor never knows the concrete shape of an entity. It reads fields
//! through the [`Record`] trait and compares them as [`Value`]s.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single attribute value as seen by predicates and sort orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Value {
    /// Compares two values of the same variant.
    ///
    /// Returns `None` when either side is `Null` or the variants differ, which
    /// predicates treat as "does not match" (SQL three-valued logic).
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Text(s) => write!(f, "'{}'", quote_escaped(s)),
        }
    }
}

/// Doubles embedded single quotes, so a rendered literal always ends at its closing quote.
pub(crate) fn quote_escaped(s: &str) -> String {
    s.replace('\'', "''")
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Read access to the attributes of a stored entity.
///
/// Returning `None` means the name is not part of the record's schema. The
/// executor reports that as [`FrameworkError::UnknownField`](crate::FrameworkError::UnknownField)
/// rather than treating it as a non-match.
pub trait Record: Send + Sync {
    fn field(&self, name: &str) -> Option<Value>;

    /// Child records reachable through a one-to-many relation.
    fn related(&self, _relation: &str) -> Option<Vec<&dyn Record>> {
        None
    }
}
