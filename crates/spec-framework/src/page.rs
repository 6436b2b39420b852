//! Pagination and sorting parameters passed alongside a specification, and the
//! page of results coming back.

use crate::error::FrameworkError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: Direction,
}

/// Ordered list of sort keys. Earlier keys take precedence.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Ascending sort on one field.
    pub fn by(field: impl Into<String>) -> Self {
        Self {
            orders: vec![SortOrder {
                field: field.into(),
                direction: Direction::Asc,
            }],
        }
    }

    /// Flips every key to descending.
    pub fn descending(mut self) -> Self {
        for order in &mut self.orders {
            order.direction = Direction::Desc;
        }
        self
    }

    pub fn ascending(mut self) -> Self {
        for order in &mut self.orders {
            order.direction = Direction::Asc;
        }
        self
    }

    /// Appends the keys of `other` as tie-breakers.
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Zero-based page request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pageable {
    page: usize,
    size: Option<usize>,
    sort: Sort,
}

impl Pageable {
    pub fn of(page: usize, size: usize) -> Result<Self, FrameworkError> {
        if size == 0 {
            return Err(FrameworkError::InvalidArgument(
                "page size must not be less than one".to_string(),
            ));
        }
        Ok(Self {
            page,
            size: Some(size),
            sort: Sort::unsorted(),
        })
    }

    /// Every matching record in one page.
    pub fn unpaged() -> Self {
        Self {
            page: 0,
            size: None,
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    pub fn is_paged(&self) -> bool {
        self.size.is_some()
    }

    pub fn offset(&self) -> usize {
        self.size.map_or(0, |size| self.page.saturating_mul(size))
    }
}

impl Default for Pageable {
    fn default() -> Self {
        Self::unpaged()
    }
}

/// One page of query results plus totals over the whole match set.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
}

impl<T> Page<T> {
    /// Slices `all` according to `pageable`.
    pub fn slice(all: Vec<T>, pageable: &Pageable) -> Self {
        let total_elements = all.len();
        match pageable.size() {
            Some(size) => Self {
                content: all.into_iter().skip(pageable.offset()).take(size).collect(),
                number: pageable.page(),
                size,
                total_elements,
            },
            None => Self {
                size: total_elements,
                content: all,
                number: 0,
                total_elements,
            },
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            1
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
