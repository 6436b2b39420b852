//! # Query Executor
//!
//! Runs a [`Specification`] against the records held by a resource actor.
//!
//! Execution is a straight pipeline:
//!
//! 1. Build the predicate into a fresh [`CriteriaQuery`], collecting join,
//!    fetch and `distinct` intent. An unrestricted specification becomes `true`.
//! 2. Expand every record into rows over the requested joins. A parent with
//!    `n` children yields `n` rows (the join fan-out); a left join keeps a
//!    childless parent as one row with a null side, an inner join drops it.
//! 3. Keep one entry per matching row. With `distinct` set, entries for the
//!    same id collapse to one.
//! 4. Sort (stable, so id order breaks ties) and slice the requested page.
//!
//! Unknown fields and relations surface as [`FrameworkError::UnknownField`].

use crate::criteria::{CriteriaQuery, Join, JoinType};
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::page::{Direction, Page, Pageable, Sort};
use crate::predicate::{Predicate, Row};
use crate::record::{Record, Value};
use crate::specification::Specification;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Returns the requested page of records matching `spec`.
pub fn find_page<T: ActorEntity>(
    store: &BTreeMap<T::Id, T>,
    spec: &Specification<T>,
    pageable: &Pageable,
) -> Result<Page<T>, FrameworkError> {
    let mut matched = select(store, spec)?;
    sort(&mut matched, pageable.sort())?;
    let records = matched.into_iter().map(|(_, record)| record.clone()).collect();
    Ok(Page::slice(records, pageable))
}

/// Number of entries `spec` selects, after `distinct` is applied.
pub fn count<T: ActorEntity>(
    store: &BTreeMap<T::Id, T>,
    spec: &Specification<T>,
) -> Result<usize, FrameworkError> {
    Ok(select(store, spec)?.len())
}

/// Distinct ids of the records matching `spec`, in id order.
pub fn matching_ids<T: ActorEntity>(
    store: &BTreeMap<T::Id, T>,
    spec: &Specification<T>,
) -> Result<Vec<T::Id>, FrameworkError> {
    let mut ids: Vec<T::Id> = select(store, spec)?
        .into_iter()
        .map(|(id, _)| id.clone())
        .collect();
    ids.dedup();
    Ok(ids)
}

fn select<'a, T: ActorEntity>(
    store: &'a BTreeMap<T::Id, T>,
    spec: &Specification<T>,
) -> Result<Vec<(&'a T::Id, &'a T)>, FrameworkError> {
    let mut query = CriteriaQuery::new();
    let predicate = spec.to_predicate(&mut query).unwrap_or(Predicate::True);
    debug!(
        %predicate,
        distinct = query.is_distinct(),
        joins = ?query.joins(),
        fetches = ?query.fetches(),
        "Executing"
    );

    let mut matched = Vec::new();
    for (id, record) in store {
        for row in expand(record, query.joins())? {
            if predicate.eval(&row)? {
                matched.push((id, record));
            }
        }
    }

    // Rows of one record are produced consecutively, so adjacent
    // deduplication is enough.
    if query.is_distinct() {
        matched.dedup_by(|a, b| a.0 == b.0);
    }
    Ok(matched)
}

fn expand<'a>(root: &'a dyn Record, joins: &'a [Join]) -> Result<Vec<Row<'a>>, FrameworkError> {
    let mut rows = vec![Row::new(root)];
    for join in joins {
        let children = root
            .related(&join.relation)
            .ok_or_else(|| FrameworkError::UnknownField(join.relation.clone()))?;
        let mut next = Vec::with_capacity(rows.len() * children.len().max(1));
        for row in rows {
            if children.is_empty() {
                if join.join_type == JoinType::Left {
                    let mut row = row;
                    row.joined.push((join.relation.as_str(), None));
                    next.push(row);
                }
                continue;
            }
            for child in &children {
                let mut joined = row.clone();
                joined.joined.push((join.relation.as_str(), Some(*child)));
                next.push(joined);
            }
        }
        rows = next;
    }
    Ok(rows)
}

fn sort<I, T: Record>(matched: &mut Vec<(I, &T)>, sort: &Sort) -> Result<(), FrameworkError> {
    if sort.is_unsorted() {
        return Ok(());
    }

    let mut keyed = Vec::with_capacity(matched.len());
    for entry in matched.drain(..) {
        let mut keys = Vec::with_capacity(sort.orders().len());
        for order in sort.orders() {
            let value = entry
                .1
                .field(&order.field)
                .ok_or_else(|| FrameworkError::UnknownField(order.field.clone()))?;
            keys.push(value);
        }
        keyed.push((keys, entry));
    }

    keyed.sort_by(|(a, _), (b, _)| {
        for ((left, right), order) in a.iter().zip(b).zip(sort.orders()) {
            let ordering = match order.direction {
                Direction::Asc => compare_nulls_first(left, right),
                Direction::Desc => compare_nulls_first(left, right).reverse(),
            };
            if ordering.is_ne() {
                return ordering;
            }
        }
        Ordering::Equal
    });

    matched.extend(keyed.into_iter().map(|(_, entry)| entry));
    Ok(())
}

fn compare_nulls_first(a: &Value, b: &Value) -> Ordering {
    a.compare(b).unwrap_or_else(|| match (a.is_null(), b.is_null()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug)]
    struct Child {
        tag: &'static str,
    }

    impl Record for Child {
        fn field(&self, name: &str) -> Option<Value> {
            (name == "tag").then(|| Value::from(self.tag))
        }
    }

    #[derive(Clone, Debug)]
    struct Parent {
        name: &'static str,
        rank: i64,
        children: Vec<Child>,
    }

    impl Record for Parent {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(Value::from(self.name)),
                "rank" => Some(Value::Int(self.rank)),
                _ => None,
            }
        }

        fn related(&self, relation: &str) -> Option<Vec<&dyn Record>> {
            (relation == "children")
                .then(|| self.children.iter().map(|c| c as &dyn Record).collect())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("parent error")]
    struct ParentError;

    #[async_trait]
    impl ActorEntity for Parent {
        type Id = u32;
        type Create = ();
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = ParentError;

        fn from_create_params(_id: u32, _params: ()) -> Result<Self, ParentError> {
            Err(ParentError)
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), ParentError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), ParentError> {
            Ok(())
        }
    }

    fn store() -> BTreeMap<u32, Parent> {
        let parent = |name, rank, tags: &[&'static str]| Parent {
            name,
            rank,
            children: tags.iter().map(|&tag| Child { tag }).collect(),
        };
        BTreeMap::from([
            (1, parent("ana", 3, &["rust", "rusty"])),
            (2, parent("bob", 1, &[])),
            (3, parent("cid", 2, &["go"])),
        ])
    }

    fn names(page: &Page<Parent>) -> Vec<&'static str> {
        page.iter().map(|p| p.name).collect()
    }

    #[test]
    fn unrestricted_returns_everything_in_id_order() {
        let page = find_page(&store(), &Specification::unrestricted(), &Pageable::unpaged()).unwrap();
        assert_eq!(names(&page), vec!["ana", "bob", "cid"]);
    }

    #[test]
    fn joined_pattern_returns_parent_once() {
        let spec = Specification::by_joined_field_pattern("children", "tag", Some("RUST"));
        let page = find_page(&store(), &spec, &Pageable::unpaged()).unwrap();
        assert_eq!(names(&page), vec!["ana"]);
        assert_eq!(count(&store(), &spec).unwrap(), 1);
    }

    #[test]
    fn join_without_distinct_fans_out() {
        let spec = Specification::<Parent>::new(|query| {
            let join = query.join("children", JoinType::Left);
            Some(Predicate::text(join.get("tag"), crate::TextOp::Contains, "rust", true))
        });
        assert_eq!(count(&store(), &spec).unwrap(), 2);
        assert_eq!(matching_ids(&store(), &spec).unwrap(), vec![1]);
    }

    #[test]
    fn left_join_keeps_childless_parent_inner_join_drops_it() {
        let left = Specification::<Parent>::new(|query| {
            query.join("children", JoinType::Left);
            query.distinct(true);
            None
        });
        let inner = Specification::<Parent>::new(|query| {
            query.join("children", JoinType::Inner);
            query.distinct(true);
            None
        });
        assert_eq!(count(&store(), &left).unwrap(), 3);
        assert_eq!(count(&store(), &inner).unwrap(), 2);
    }

    #[test]
    fn sorts_and_pages() {
        let pageable = Pageable::of(0, 2).unwrap().with_sort(Sort::by("rank").descending());
        let page = find_page(&store(), &Specification::unrestricted(), &pageable).unwrap();
        assert_eq!(names(&page), vec!["ana", "cid"]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn unknown_sort_field_is_reported() {
        let pageable = Pageable::unpaged().with_sort(Sort::by("salary"));
        let err = find_page(&store(), &Specification::unrestricted(), &pageable).unwrap_err();
        assert!(matches!(err, FrameworkError::UnknownField(f) if f == "salary"));
    }

    #[test]
    fn unknown_relation_is_reported() {
        let spec = Specification::by_joined_field_pattern("pets", "name", Some("rex"));
        let err = count(&store(), &spec).unwrap_err();
        assert!(matches!(err, FrameworkError::UnknownField(f) if f == "pets"));
    }
}
