//! Author aggregate and its owned books.
//!
//! # Actor Framework
//! [`Author`] implements [`ActorEntity`](spec_framework::ActorEntity) (see
//! [`author_actor::entity`](crate::author_actor::entity)) and
//! [`Record`], which exposes it to specifications by field name:
//!
//! | name         | value                 |
//! |--------------|-----------------------|
//! | `id`         | `Int`                 |
//! | `first_name` | `Text`                |
//! | `last_name`  | `Text`                |
//! | `email`      | `Text`                |
//! | `age`        | `Int`                 |
//! | `books`      | relation to [`Book`]  |
//!
//! A [`Book`] exposes `id` and `title`.
use serde::{Deserialize, Serialize};
use spec_framework::{Record, Value};
use std::fmt::Display;

/// Type-safe identifier for Authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuthorId(pub u32);

impl From<u32> for AuthorId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "author_{}", self.0)
    }
}

/// Identifier of a book, sequential within its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(pub u32);

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "book_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub books: Vec<Book>,
}

impl Author {
    /// Appends a book and returns the id it was given.
    pub fn add_book(&mut self, title: impl Into<String>) -> BookId {
        let next = self.books.iter().map(|b| b.id.0).max().unwrap_or(0) + 1;
        let id = BookId(next);
        self.books.push(Book {
            id,
            title: title.into(),
        });
        id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// DTO for Author creation. `books` are titles, stored in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    #[serde(default)]
    pub books: Vec<String>,
}

impl AuthorCreate {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            age,
            books: Vec::new(),
        }
    }

    pub fn with_book(mut self, title: impl Into<String>) -> Self {
        self.books.push(title.into());
        self
    }
}

// DTOs for Author updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl Record for Author {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id.0)),
            "first_name" => Some(Value::from(self.first_name.as_str())),
            "last_name" => Some(Value::from(self.last_name.as_str())),
            "email" => Some(Value::from(self.email.as_str())),
            "age" => Some(Value::from(self.age)),
            _ => None,
        }
    }

    fn related(&self, relation: &str) -> Option<Vec<&dyn Record>> {
        match relation {
            "books" => Some(self.books.iter().map(|b| b as &dyn Record).collect()),
            _ => None,
        }
    }
}

impl Record for Book {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id.0)),
            "title" => Some(Value::from(self.title.as_str())),
            _ => None,
        }
    }
}
