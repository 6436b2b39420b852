use super::Author;
use serde::{Deserialize, Serialize};

/// Read-only projection of an [`Author`]: name, email and age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub first_name: String,
    pub email: String,
    pub age: i32,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            email: author.email.clone(),
            age: author.age,
        }
    }
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            first_name: author.first_name,
            email: author.email,
            age: author.age,
        }
    }
}
