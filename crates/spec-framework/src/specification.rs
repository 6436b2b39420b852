//! # Specifications
//!
//! A [`Specification`] is a reusable recipe that, given a fresh
//! [`CriteriaQuery`], produces an optional [`Predicate`]. `None` is a no-op:
//! the criterion was absent and must not constrain the query.
//!
//! The factories in this module own the "absent criterion" policy. A caller
//! never checks for `None` or empty strings before composing; it passes what
//! it has and lets the factory decide:
//!
//! | factory                    | no-op when            |
//! |----------------------------|-----------------------|
//! | [`by_exact_field`]         | value is `None`       |
//! | [`by_pattern_field`]       | `None` or empty       |
//! | [`by_range_lower_bound`]   | `None` or `<= 0`      |
//! | [`by_range_upper_bound`]   | `None` or `<= 0`      |
//! | [`by_joined_field_pattern`]| `None` or empty       |
//!
//! [`by_exact_field`]: Specification::by_exact_field
//! [`by_pattern_field`]: Specification::by_pattern_field
//! [`by_range_lower_bound`]: Specification::by_range_lower_bound
//! [`by_range_upper_bound`]: Specification::by_range_upper_bound
//! [`by_joined_field_pattern`]: Specification::by_joined_field_pattern
//!
//! Composition with [`Specification::all_of`] keeps only the present
//! sub-predicates and ANDs them in order. When none is present the result is
//! unrestricted and matches every record.

use crate::criteria::{CriteriaQuery, JoinType};
use crate::predicate::{CompareOp, FieldRef, Predicate, TextOp};
use crate::record::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type BuildFn = dyn Fn(&mut CriteriaQuery) -> Option<Predicate> + Send + Sync;

/// A composable, shareable query criterion for entities of type `T`.
pub struct Specification<T> {
    build: Arc<BuildFn>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Specification<T> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scratch = CriteriaQuery::new();
        match self.to_predicate(&mut scratch) {
            Some(p) => write!(f, "Specification({p})"),
            None => write!(f, "Specification(unrestricted)"),
        }
    }
}

impl<T> Default for Specification<T> {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl<T> Specification<T> {
    pub fn new(
        build: impl Fn(&mut CriteriaQuery) -> Option<Predicate> + Send + Sync + 'static,
    ) -> Self {
        Self {
            build: Arc::new(build),
            _entity: PhantomData,
        }
    }

    /// The no-op specification: matches every record.
    pub fn unrestricted() -> Self {
        Self::new(|_| None)
    }

    /// Wraps an already-built predicate.
    pub fn from_predicate(predicate: Predicate) -> Self {
        Self::new(move |_| Some(predicate.clone()))
    }

    /// Builds the predicate, recording any join/fetch/distinct intent on `query`.
    pub fn to_predicate(&self, query: &mut CriteriaQuery) -> Option<Predicate> {
        (self.build)(query)
    }

    pub fn and(self, other: Specification<T>) -> Self {
        let (lhs, rhs) = (self.build, other.build);
        Self::new(move |query| match (lhs(query), rhs(query)) {
            (Some(a), Some(b)) => Some(a.and(b)),
            (a, b) => a.or(b),
        })
    }

    /// Disjunction. A no-op side is ignored, so `or` with an absent
    /// criterion leaves the other side unchanged.
    pub fn or(self, other: Specification<T>) -> Self {
        let (lhs, rhs) = (self.build, other.build);
        Self::new(move |query| match (lhs(query), rhs(query)) {
            (Some(a), Some(b)) => Some(a.or(b)),
            (a, b) => a.or(b),
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        let inner = self.build;
        Self::new(move |query| inner(query).map(Predicate::not))
    }

    /// AND of every present specification, in iteration order.
    pub fn all_of(specs: impl IntoIterator<Item = Specification<T>>) -> Self {
        specs
            .into_iter()
            .fold(Self::unrestricted(), |acc, spec| acc.and(spec))
    }

    /// OR of every present specification, in iteration order.
    pub fn any_of(specs: impl IntoIterator<Item = Specification<T>>) -> Self {
        specs
            .into_iter()
            .fold(Self::unrestricted(), |acc, spec| acc.or(spec))
    }

    // --- Unconditional building blocks ---

    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::from_predicate(Predicate::compare(FieldRef::root(field), op, value))
    }

    pub fn text(
        field: impl Into<String>,
        op: TextOp,
        pattern: impl Into<String>,
        ignore_case: bool,
    ) -> Self {
        Self::from_predicate(Predicate::text(FieldRef::root(field), op, pattern, ignore_case))
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Value>, ignore_case: bool) -> Self {
        Self::from_predicate(Predicate::In {
            field: FieldRef::root(field),
            values,
            ignore_case,
        })
    }

    // --- Null-skipping criterion factories ---

    /// `field = value`; no-op when `value` is `None`.
    pub fn by_exact_field(field: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => Self::compare(field, CompareOp::Eq, value),
            None => Self::unrestricted(),
        }
    }

    /// Case-insensitive substring match; no-op when `None` or empty.
    pub fn by_pattern_field(field: impl Into<String>, pattern: Option<&str>) -> Self {
        match non_empty(pattern) {
            Some(pattern) => Self::text(field, TextOp::Contains, pattern.to_lowercase(), true),
            None => Self::unrestricted(),
        }
    }

    /// `field >= bound`; no-op when `None` or not positive.
    pub fn by_range_lower_bound(field: impl Into<String>, bound: Option<i64>) -> Self {
        match positive(bound) {
            Some(bound) => Self::compare(field, CompareOp::Gte, bound),
            None => Self::unrestricted(),
        }
    }

    /// `field <= bound`; no-op when `None` or not positive.
    pub fn by_range_upper_bound(field: impl Into<String>, bound: Option<i64>) -> Self {
        match positive(bound) {
            Some(bound) => Self::compare(field, CompareOp::Lte, bound),
            None => Self::unrestricted(),
        }
    }

    /// Case-insensitive substring match on an attribute of a related
    /// collection; no-op when `None` or empty.
    ///
    /// Requests a left outer fetch join on `relation` and marks the query
    /// distinct, so a parent with several matching children is returned once.
    pub fn by_joined_field_pattern(
        relation: impl Into<String>,
        field: impl Into<String>,
        fragment: Option<&str>,
    ) -> Self {
        let Some(fragment) = non_empty(fragment) else {
            return Self::unrestricted();
        };
        let (relation, field, fragment) = (relation.into(), field.into(), fragment.to_lowercase());
        Self::new(move |query| {
            query.fetch(&relation, JoinType::Left);
            query.distinct(true);
            let join = query.join(&relation, JoinType::Left);
            Some(Predicate::text(
                join.get(&field),
                TextOp::Contains,
                fragment.clone(),
                true,
            ))
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Row;
    use crate::record::Record;

    struct Item {
        name: &'static str,
        score: i64,
    }

    impl Record for Item {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(Value::from(self.name)),
                "score" => Some(Value::Int(self.score)),
                _ => None,
            }
        }
    }

    type Spec = Specification<Item>;

    fn built(spec: &Spec) -> Option<Predicate> {
        spec.to_predicate(&mut CriteriaQuery::new())
    }

    fn matching<'a>(spec: &Spec, items: &'a [Item]) -> Vec<&'a str> {
        let predicate = built(spec).unwrap_or(Predicate::True);
        items
            .iter()
            .filter(|item| predicate.eval(&Row::new(*item)).unwrap())
            .map(|item| item.name)
            .collect()
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Daniel", score: 37 },
            Item { name: "Maria", score: 25 },
            Item { name: "Danilo", score: 50 },
            Item { name: "Lula", score: 70 },
        ]
    }

    #[test]
    fn absent_criteria_are_no_ops() {
        assert!(built(&Spec::by_exact_field("name", None::<&str>)).is_none());
        assert!(built(&Spec::by_pattern_field("name", None)).is_none());
        assert!(built(&Spec::by_pattern_field("name", Some(""))).is_none());
        assert!(built(&Spec::by_joined_field_pattern("books", "title", Some(""))).is_none());
    }

    #[test]
    fn range_guard_treats_non_positive_as_absent() {
        assert!(built(&Spec::by_range_lower_bound("score", Some(0))).is_none());
        assert!(built(&Spec::by_range_lower_bound("score", Some(-5))).is_none());
        assert!(built(&Spec::by_range_upper_bound("score", Some(0))).is_none());
        assert_eq!(
            built(&Spec::by_range_lower_bound("score", Some(1))),
            Some(Predicate::compare(FieldRef::root("score"), CompareOp::Gte, 1))
        );
    }

    #[test]
    fn all_absent_composes_to_unrestricted() {
        let spec = Spec::all_of([
            Spec::by_pattern_field("name", None),
            Spec::by_range_lower_bound("score", None),
            Spec::by_range_upper_bound("score", Some(0)),
        ]);
        assert!(built(&spec).is_none());
        assert_eq!(matching(&spec, &items()).len(), 4);
    }

    #[test]
    fn single_present_criterion_composes_to_itself() {
        let alone = Spec::by_pattern_field("name", Some("DAN"));
        let composed = Spec::all_of([
            Spec::by_exact_field("name", None::<&str>),
            alone.clone(),
            Spec::by_range_lower_bound("score", None),
        ]);
        assert_eq!(built(&composed), built(&alone));
    }

    #[test]
    fn composition_order_does_not_change_matches() {
        let a = || Spec::by_pattern_field("name", Some("da"));
        let b = || Spec::by_range_lower_bound("score", Some(30));
        let c = || Spec::by_range_upper_bound("score", Some(45));
        let data = items();
        let forward = matching(&Spec::all_of([a(), b(), c()]), &data);
        let backward = matching(&Spec::all_of([c(), b(), a()]), &data);
        assert_eq!(forward, vec!["Daniel"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn or_ignores_no_op_side() {
        let present = Spec::by_exact_field("name", Some("Maria"));
        let spec = Spec::by_exact_field("name", None::<&str>).or(present.clone());
        assert_eq!(built(&spec), built(&present));
        let both = present.or(Spec::by_exact_field("name", Some("Lula")));
        assert_eq!(matching(&both, &items()), vec!["Maria", "Lula"]);
    }

    #[test]
    fn not_of_no_op_stays_no_op() {
        assert!(built(&Spec::unrestricted().not()).is_none());
        let spec = Spec::by_pattern_field("name", Some("dan")).not();
        assert_eq!(matching(&spec, &items()), vec!["Maria", "Lula"]);
    }

    #[test]
    fn joined_pattern_declares_fetch_join_and_distinct() {
        let spec = Spec::by_joined_field_pattern("books", "title", Some("Spring"));
        let mut query = CriteriaQuery::new();
        let predicate = spec.to_predicate(&mut query).unwrap();
        assert!(query.is_distinct());
        assert_eq!(query.joins()[0].relation, "books");
        assert_eq!(query.joins()[0].join_type, JoinType::Left);
        assert_eq!(query.fetches().len(), 1);
        assert_eq!(predicate.to_string(), "lower(books.title) like '%spring%'");
    }

    #[test]
    fn debug_shows_built_predicate() {
        let spec = Spec::by_exact_field("name", Some("Daniel"));
        assert_eq!(format!("{spec:?}"), "Specification(name = 'Daniel')");
        assert_eq!(format!("{:?}", Spec::unrestricted()), "Specification(unrestricted)");
    }
}
