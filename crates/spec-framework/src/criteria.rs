//! Per-execution query intent that specifications may declare while they
//! build their predicate: joins, fetches and `distinct`.

use crate::predicate::FieldRef;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinType {
    /// Keeps parents without children as a single row with null columns.
    Left,
    /// Drops parents without children.
    Inner,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Join {
    pub relation: String,
    pub join_type: JoinType,
}

impl Join {
    /// Reference to an attribute of the joined record.
    pub fn get(&self, field: &str) -> FieldRef {
        FieldRef::joined(self.relation.clone(), field)
    }
}

/// Created fresh for every query and discarded after it runs.
#[derive(Clone, Debug, Default)]
pub struct CriteriaQuery {
    distinct: bool,
    joins: Vec<Join>,
    fetches: Vec<Join>,
}

impl CriteriaQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Joins a relation for filtering. Joining the same relation twice
    /// reuses the first join; an inner join wins over a left join.
    pub fn join(&mut self, relation: &str, join_type: JoinType) -> Join {
        if let Some(existing) = self.joins.iter_mut().find(|j| j.relation == relation) {
            if join_type == JoinType::Inner {
                existing.join_type = JoinType::Inner;
            }
            return existing.clone();
        }
        let join = Join {
            relation: relation.to_string(),
            join_type,
        };
        self.joins.push(join.clone());
        join
    }

    /// Asks the executor to load the relation together with the root.
    pub fn fetch(&mut self, relation: &str, join_type: JoinType) {
        if !self.fetches.iter().any(|f| f.relation == relation) {
            self.fetches.push(Join {
                relation: relation.to_string(),
                join_type,
            });
        }
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn fetches(&self) -> &[Join] {
        &self.fetches
    }
}
