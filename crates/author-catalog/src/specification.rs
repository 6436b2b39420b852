//! # Author Specifications
//!
//! Named criteria over [`Author`] and the two filter compositions.
//!
//! Each function takes the raw, possibly absent input and returns a
//! [`Specification`] that is a no-op when the input is absent, so callers
//! compose without checking anything first:
//!
//! ```rust
//! use author_catalog::specification as spec;
//! use spec_framework::Specification;
//!
//! let daniels_over_30 = Specification::all_of([
//!     spec::has_first_name(Some("Daniel")),
//!     spec::has_age_greater_than(30),
//!     spec::email_contains(Some("gmail")),
//! ]);
//! # let _ = daniels_over_30;
//! ```

use crate::author_actor::AuthorError;
use crate::filter::{AuthorBookFilter, AuthorFilter};
use crate::model::Author;
use spec_framework::{CompareOp, Specification};

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const EMAIL: &str = "email";
pub const AGE: &str = "age";
pub const BOOKS: &str = "books";
pub const TITLE: &str = "title";

/// `first_name = name`, case-sensitive.
pub fn has_first_name(name: Option<&str>) -> Specification<Author> {
    Specification::by_exact_field(FIRST_NAME, name)
}

/// Case-insensitive substring of the first name.
pub fn first_name_like(pattern: Option<&str>) -> Specification<Author> {
    Specification::by_pattern_field(FIRST_NAME, pattern)
}

/// Case-insensitive substring of the email.
pub fn email_contains(fragment: Option<&str>) -> Specification<Author> {
    Specification::by_pattern_field(EMAIL, fragment)
}

/// `age >= min_age`.
pub fn age_at_least(min_age: Option<i32>) -> Specification<Author> {
    Specification::by_range_lower_bound(AGE, min_age.map(i64::from))
}

/// `age <= max_age`.
pub fn age_at_most(max_age: Option<i32>) -> Specification<Author> {
    Specification::by_range_upper_bound(AGE, max_age.map(i64::from))
}

/// Strict `age > age`; no-op when `age <= 0`.
pub fn has_age_greater_than(age: i32) -> Specification<Author> {
    if age <= 0 {
        return Specification::unrestricted();
    }
    Specification::compare(AGE, CompareOp::Gt, age)
}

/// Authors with at least one book whose title contains `fragment`,
/// case-insensitively. Each author is returned once.
pub fn book_title_contains(fragment: Option<&str>) -> Specification<Author> {
    Specification::by_joined_field_pattern(BOOKS, TITLE, fragment)
}

/// ANDs every present criterion of `filter`, in field order.
///
/// A missing filter is rejected rather than treated as "match everything".
pub fn build(filter: Option<&AuthorFilter>) -> Result<Specification<Author>, AuthorError> {
    let filter =
        filter.ok_or_else(|| AuthorError::InvalidArgument("author filter is required".into()))?;
    Ok(Specification::all_of([
        first_name_like(filter.first_name.as_deref()),
        email_contains(filter.email_fragment.as_deref()),
        age_at_least(filter.min_age),
        age_at_most(filter.max_age),
    ]))
}

/// Exact first name, strict minimum age and book title fragment.
pub fn build_book_filter(
    filter: Option<&AuthorBookFilter>,
) -> Result<Specification<Author>, AuthorError> {
    let filter = filter
        .ok_or_else(|| AuthorError::InvalidArgument("author book filter is required".into()))?;
    Ok(Specification::all_of([
        has_first_name(filter.first_name.as_deref()),
        filter
            .min_age
            .map_or_else(Specification::unrestricted, has_age_greater_than),
        book_title_contains(filter.book_title_fragment.as_deref()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spec_framework::{CriteriaQuery, JoinType};

    fn rendered(spec: &Specification<Author>) -> Option<String> {
        spec.to_predicate(&mut CriteriaQuery::new())
            .map(|p| p.to_string())
    }

    #[test]
    fn empty_filter_is_unrestricted() {
        let spec = build(Some(&AuthorFilter::default())).unwrap();
        assert_eq!(rendered(&spec), None);
    }

    #[test]
    fn missing_filter_is_rejected() {
        assert!(matches!(build(None), Err(AuthorError::InvalidArgument(_))));
        assert!(matches!(
            build_book_filter(None),
            Err(AuthorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn full_filter_renders_in_field_order() {
        let filter = AuthorFilter::new()
            .with_first_name("Da")
            .with_email_fragment("GMAIL")
            .with_min_age(30)
            .with_max_age(61);
        assert_eq!(
            rendered(&build(Some(&filter)).unwrap()).unwrap(),
            "(lower(first_name) like '%da%' and lower(email) like '%gmail%' and age >= 30 and age <= 61)"
        );
    }

    #[test]
    fn zero_age_bounds_are_ignored() {
        let filter = AuthorFilter::new().with_min_age(0).with_max_age(-1);
        assert_eq!(rendered(&build(Some(&filter)).unwrap()), None);
        assert_eq!(rendered(&has_age_greater_than(0)), None);
        assert_eq!(rendered(&has_age_greater_than(30)).unwrap(), "age > 30");
    }

    #[test]
    fn book_filter_requests_distinct_left_fetch_join() {
        let filter = AuthorBookFilter::new()
            .with_first_name("Caio")
            .with_book_title_fragment("Spring")
            .with_min_age(30);
        let spec = build_book_filter(Some(&filter)).unwrap();

        let mut query = CriteriaQuery::new();
        let predicate = spec.to_predicate(&mut query).unwrap();
        assert_eq!(
            predicate.to_string(),
            "(first_name = 'Caio' and age > 30 and lower(books.title) like '%spring%')"
        );
        assert!(query.is_distinct());
        assert_eq!(query.joins().len(), 1);
        assert_eq!(query.joins()[0].join_type, JoinType::Left);
        assert_eq!(query.fetches()[0].relation, BOOKS);
    }

    #[test]
    fn book_filter_without_fragment_joins_nothing() {
        let filter = AuthorBookFilter::new().with_first_name("Caio");
        let mut query = CriteriaQuery::new();
        build_book_filter(Some(&filter))
            .unwrap()
            .to_predicate(&mut query);
        assert!(query.joins().is_empty());
        assert!(!query.is_distinct());
    }
}
