//! # Predicate AST
//!
//! Pure, schema-agnostic description of a boolean condition over a row.
//! Specifications produce these trees; the executor evaluates them. A
//! predicate never holds a reference to any record.

use crate::error::FrameworkError;
use crate::record::{quote_escaped, Record, Value};
use std::fmt;

/// An attribute on the root record, or on a record reached through a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub relation: Option<String>,
    pub name: String,
}

impl FieldRef {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            relation: None,
            name: name.into(),
        }
    }

    pub fn joined(relation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            relation: Some(relation.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.relation {
            Some(relation) => write!(f, "{relation}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextOp {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    True,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Compare {
        field: FieldRef,
        op: CompareOp,
        value: Value,
    },
    Text {
        field: FieldRef,
        op: TextOp,
        pattern: String,
        ignore_case: bool,
    },
    In {
        field: FieldRef,
        values: Vec<Value>,
        ignore_case: bool,
    },
}

impl Predicate {
    pub fn compare(field: FieldRef, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            field,
            op,
            value: value.into(),
        }
    }

    pub fn text(field: FieldRef, op: TextOp, pattern: impl Into<String>, ignore_case: bool) -> Self {
        Self::Text {
            field,
            op,
            pattern: pattern.into(),
            ignore_case,
        }
    }

    /// Conjunction that flattens nested `And` nodes and drops `True`.
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = Vec::new();
        for p in [self, other] {
            match p {
                Predicate::True => {}
                Predicate::And(inner) => parts.extend(inner),
                p => parts.push(p),
            }
        }
        match parts.len() {
            0 => Predicate::True,
            1 => parts.remove(0),
            _ => Predicate::And(parts),
        }
    }

    /// Disjunction that flattens nested `Or` nodes. `True` absorbs.
    pub fn or(self, other: Predicate) -> Predicate {
        if self == Predicate::True || other == Predicate::True {
            return Predicate::True;
        }
        let mut parts = Vec::new();
        for p in [self, other] {
            match p {
                Predicate::Or(inner) => parts.extend(inner),
                p => parts.push(p),
            }
        }
        Predicate::Or(parts)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Evaluates this predicate against one row.
    pub fn eval(&self, row: &Row<'_>) -> Result<bool, FrameworkError> {
        match self {
            Predicate::True => Ok(true),
            Predicate::And(parts) => {
                for p in parts {
                    if !p.eval(row)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(parts) => {
                for p in parts {
                    if p.eval(row)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::Not(inner) => Ok(!inner.eval(row)?),
            Predicate::Compare { field, op, value } => {
                let actual = row.resolve(field)?;
                let Some(ordering) = actual.compare(value) else {
                    return Ok(false);
                };
                Ok(match op {
                    CompareOp::Eq => ordering.is_eq(),
                    CompareOp::Ne => ordering.is_ne(),
                    CompareOp::Lt => ordering.is_lt(),
                    CompareOp::Lte => ordering.is_le(),
                    CompareOp::Gt => ordering.is_gt(),
                    CompareOp::Gte => ordering.is_ge(),
                })
            }
            Predicate::Text {
                field,
                op,
                pattern,
                ignore_case,
            } => {
                let actual = row.resolve(field)?;
                let Some(text) = actual.as_text() else {
                    return Ok(false);
                };
                Ok(text_matches(text, *op, pattern, *ignore_case))
            }
            Predicate::In {
                field,
                values,
                ignore_case,
            } => {
                let actual = row.resolve(field)?;
                Ok(values.iter().any(|candidate| match (&actual, candidate) {
                    (Value::Text(a), Value::Text(b)) if *ignore_case => {
                        a.to_lowercase() == b.to_lowercase()
                    }
                    (a, b) => a.compare(b).is_some_and(|o| o.is_eq()),
                }))
            }
        }
    }
}

fn text_matches(text: &str, op: TextOp, pattern: &str, ignore_case: bool) -> bool {
    let (text, pattern) = if ignore_case {
        (text.to_lowercase(), pattern.to_lowercase())
    } else {
        (text.to_string(), pattern.to_string())
    };
    match op {
        TextOp::Equals => text == pattern,
        TextOp::Contains => text.contains(&pattern),
        TextOp::StartsWith => text.starts_with(&pattern),
        TextOp::EndsWith => text.ends_with(&pattern),
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, parts: &[Predicate], sep: &str) -> fmt::Result {
            write!(f, "(")?;
            for (i, p) in parts.iter().enumerate() {
                if i > 0 {
                    write!(f, " {sep} ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, ")")
        }

        match self {
            Predicate::True => write!(f, "true"),
            Predicate::And(parts) => join(f, parts, "and"),
            Predicate::Or(parts) => join(f, parts, "or"),
            Predicate::Not(inner) => write!(f, "not {inner}"),
            Predicate::Compare { field, op, value } => {
                let op = match op {
                    CompareOp::Eq => "=",
                    CompareOp::Ne => "<>",
                    CompareOp::Lt => "<",
                    CompareOp::Lte => "<=",
                    CompareOp::Gt => ">",
                    CompareOp::Gte => ">=",
                };
                write!(f, "{field} {op} {value}")
            }
            Predicate::Text {
                field,
                op,
                pattern,
                ignore_case,
            } => {
                let pattern = quote_escaped(pattern);
                let like = match op {
                    TextOp::Equals => pattern,
                    TextOp::Contains => format!("%{pattern}%"),
                    TextOp::StartsWith => format!("{pattern}%"),
                    TextOp::EndsWith => format!("%{pattern}"),
                };
                if *ignore_case {
                    write!(f, "lower({field}) like '{}'", like.to_lowercase())
                } else {
                    write!(f, "{field} like '{like}'")
                }
            }
            Predicate::In { field, values, .. } => {
                write!(f, "{field} in (")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// One candidate row: a root record plus at most one record per joined
/// relation. `None` marks the null side of a left outer join.
#[derive(Clone)]
pub struct Row<'a> {
    pub root: &'a dyn Record,
    pub joined: Vec<(&'a str, Option<&'a dyn Record>)>,
}

impl<'a> Row<'a> {
    pub fn new(root: &'a dyn Record) -> Self {
        Self {
            root,
            joined: Vec::new(),
        }
    }

    fn resolve(&self, field: &FieldRef) -> Result<Value, FrameworkError> {
        match &field.relation {
            None => self
                .root
                .field(&field.name)
                .ok_or_else(|| FrameworkError::UnknownField(field.to_string())),
            Some(relation) => {
                let (_, child) = self
                    .joined
                    .iter()
                    .find(|(name, _)| *name == relation.as_str())
                    .ok_or_else(|| FrameworkError::UnknownField(field.to_string()))?;
                match child {
                    Some(child) => child
                        .field(&field.name)
                        .ok_or_else(|| FrameworkError::UnknownField(field.to_string())),
                    None => Ok(Value::Null),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: &'static str,
        age: i64,
    }

    impl Record for Person {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(Value::from(self.name)),
                "age" => Some(Value::Int(self.age)),
                _ => None,
            }
        }
    }

    fn eval(p: &Predicate, person: &Person) -> bool {
        p.eval(&Row::new(person)).unwrap()
    }

    #[test]
    fn ignore_case_contains_matches_any_casing() {
        let p = Predicate::text(FieldRef::root("name"), TextOp::Contains, "dan", true);
        for name in ["DANIEL", "daniel", "DaNiEl"] {
            assert!(eval(&p, &Person { name, age: 1 }), "{name}");
        }
        assert!(!eval(&p, &Person { name: "Bolsonaro", age: 1 }));
    }

    #[test]
    fn compare_ops_are_inclusive_where_expected() {
        let p = Person { name: "x", age: 30 };
        let gte = Predicate::compare(FieldRef::root("age"), CompareOp::Gte, 30);
        let gt = Predicate::compare(FieldRef::root("age"), CompareOp::Gt, 30);
        let lte = Predicate::compare(FieldRef::root("age"), CompareOp::Lte, 30);
        assert!(eval(&gte, &p));
        assert!(!eval(&gt, &p));
        assert!(eval(&lte, &p));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let p = Predicate::compare(FieldRef::root("salary"), CompareOp::Eq, 1);
        let person = Person { name: "x", age: 1 };
        let err = p.eval(&Row::new(&person)).unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: salary");
    }

    #[test]
    fn and_flattens_and_drops_true() {
        let a = Predicate::compare(FieldRef::root("age"), CompareOp::Gt, 1);
        let b = Predicate::compare(FieldRef::root("age"), CompareOp::Lt, 9);
        assert_eq!(Predicate::True.and(a.clone()), a);
        let both = a.clone().and(b.clone());
        assert_eq!(both, Predicate::And(vec![a.clone(), b.clone()]));
        assert_eq!(
            both.and(a.clone()),
            Predicate::And(vec![a.clone(), b, a])
        );
    }

    #[test]
    fn renders_like_sql() {
        let p = Predicate::text(FieldRef::joined("books", "title"), TextOp::Contains, "Spring", true)
            .and(Predicate::compare(FieldRef::root("age"), CompareOp::Gte, 30));
        assert_eq!(
            p.to_string(),
            "(lower(books.title) like '%spring%' and age >= 30)"
        );
    }

    #[test]
    fn quotes_in_patterns_are_doubled() {
        let p = Predicate::text(FieldRef::root("last_name"), TextOp::StartsWith, "O'B", false)
            .or(Predicate::compare(FieldRef::root("email"), CompareOp::Eq, "a'b@x.com"));
        assert_eq!(
            p.to_string(),
            "(last_name like 'O''B%' or email = 'a''b@x.com')"
        );
    }
}
