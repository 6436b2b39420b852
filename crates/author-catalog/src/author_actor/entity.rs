//! [`ActorEntity`] implementation for [`Author`].
//!
//! Column constraints are checked on create and on every update:
//!
//! | field        | rule                          |
//! |--------------|-------------------------------|
//! | `first_name` | 1..=35 characters             |
//! | `last_name`  | 1..=50 characters             |
//! | `email`      | 1..=100 characters, has `@`   |
//! | `age`        | not negative                  |
//!
//! `email` is also unique across the catalog, which the actor enforces
//! through [`ActorEntity::unique_keys`].

use super::{AuthorAction, AuthorActionResult, AuthorError};
use crate::model::{Author, AuthorCreate, AuthorId, AuthorUpdate};
use crate::specification::EMAIL;
use async_trait::async_trait;
use spec_framework::{ActorEntity, Value};
use tracing::debug;

const FIRST_NAME_MAX: usize = 35;
const LAST_NAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;

#[async_trait]
impl ActorEntity for Author {
    type Id = AuthorId;
    type Create = AuthorCreate;
    type Update = AuthorUpdate;
    type Action = AuthorAction;
    type ActionResult = AuthorActionResult;
    type Context = ();
    type Error = AuthorError;

    fn from_create_params(id: AuthorId, params: AuthorCreate) -> Result<Self, Self::Error> {
        let mut author = Author {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            age: params.age,
            books: Vec::new(),
        };
        validate(&author)?;
        for title in params.books {
            author.add_book(title);
        }
        Ok(author)
    }

    /// Applies the present fields, then re-validates the whole author.
    async fn on_update(
        &mut self,
        update: AuthorUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        validate(self)
    }

    fn unique_keys(&self) -> Vec<(&'static str, Value)> {
        vec![(EMAIL, Value::from(self.email.as_str()))]
    }

    async fn handle_action(
        &mut self,
        action: AuthorAction,
        _ctx: &Self::Context,
    ) -> Result<AuthorActionResult, Self::Error> {
        match action {
            AuthorAction::AddBook(title) => {
                if title.trim().is_empty() {
                    return Err(AuthorError::ValidationError(
                        "book title must not be blank".into(),
                    ));
                }
                let book_id = self.add_book(title);
                debug!(author = %self.id, %book_id, "Book added");
                Ok(AuthorActionResult::BookAdded(book_id))
            }
        }
    }
}

fn validate(author: &Author) -> Result<(), AuthorError> {
    check_length("first_name", &author.first_name, FIRST_NAME_MAX)?;
    check_length("last_name", &author.last_name, LAST_NAME_MAX)?;
    check_length("email", &author.email, EMAIL_MAX)?;
    if !author.email.contains('@') {
        return Err(AuthorError::ValidationError(format!(
            "email '{}' must contain '@'",
            author.email
        )));
    }
    if author.age < 0 {
        return Err(AuthorError::ValidationError(
            "age must not be negative".into(),
        ));
    }
    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AuthorError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(AuthorError::ValidationError(format!(
            "{field} must be between 1 and {max} characters, got {len}"
        )));
    }
    Ok(())
}
