//! # Author Actor
//!
//! The Author resource actor: owns every [`Author`] (and their books) and
//! answers CRUD, specification queries and the [`AuthorAction`]s below.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](spec_framework::ActorEntity) implementation and column validation
//! - [`error`] - [`AuthorError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use author_catalog::author_actor;
//! use author_catalog::config::CatalogConfig;
//! use author_catalog::model::AuthorCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = author_actor::new(&CatalogConfig::default());
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_author(AuthorCreate::new("Daniel", "Penelva", "daniel.penelva@gmail.com", 37))
//!         .await?;
//!     assert!(client.exists_by_email("daniel.penelva@gmail.com").await?);
//!     # let _ = id;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AuthorClient;
use crate::config::CatalogConfig;
use crate::model::{Author, BookId};
use spec_framework::ResourceActor;

/// Custom operations on a single author.
#[derive(Debug, Clone)]
pub enum AuthorAction {
    /// Appends a book with the given title.
    AddBook(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorActionResult {
    BookAdded(BookId),
}

/// Creates a new Author actor and its client.
pub fn new(config: &CatalogConfig) -> (ResourceActor<Author>, AuthorClient) {
    let (actor, generic_client) = ResourceActor::new(config.mailbox_capacity);
    let client = AuthorClient::new(generic_client, config.default_page_size);
    (actor, client)
}
