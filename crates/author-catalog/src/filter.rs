//! Optional-field filters accepted by the author search.
//!
//! Every field is optional and an absent field constrains nothing, so both
//! types deserialize from partial JSON bodies (`{"first_name": "Da"}`).

use serde::{Deserialize, Serialize};

/// Criteria over the author's own columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorFilter {
    /// Case-insensitive substring of the first name.
    pub first_name: Option<String>,
    /// Case-insensitive substring of the email.
    pub email_fragment: Option<String>,
    /// Inclusive lower age bound. Non-positive values are ignored.
    pub min_age: Option<i32>,
    /// Inclusive upper age bound. Non-positive values are ignored.
    pub max_age: Option<i32>,
}

impl AuthorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_email_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.email_fragment = Some(fragment.into());
        self
    }

    pub fn with_min_age(mut self, min_age: i32) -> Self {
        self.min_age = Some(min_age);
        self
    }

    pub fn with_max_age(mut self, max_age: i32) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

/// Criteria mixing author columns with the titles of the author's books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorBookFilter {
    /// Exact first name.
    pub first_name: Option<String>,
    /// Case-insensitive substring of any book title.
    pub book_title_fragment: Option<String>,
    /// Exclusive lower age bound. Non-positive values are ignored.
    pub min_age: Option<i32>,
}

impl AuthorBookFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_book_title_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.book_title_fragment = Some(fragment.into());
        self
    }

    pub fn with_min_age(mut self, min_age: i32) -> Self {
        self.min_age = Some(min_age);
        self
    }
}
