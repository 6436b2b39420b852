//! # Author Catalog
//!
//! An in-memory author catalog searchable with composable specifications.
//!
//! - **[model]**: [`Author`](model::Author), its [`Book`](model::Book)s and the
//!   [`AuthorView`](model::AuthorView) projection.
//! - **[filter]**: optional-field search DTOs ([`AuthorFilter`](filter::AuthorFilter),
//!   [`AuthorBookFilter`](filter::AuthorBookFilter)).
//! - **[specification]**: named author criteria and the filter compositions.
//! - **[author_actor]**: the Author resource actor, its validation and errors.
//! - **[clients]**: [`AuthorClient`](clients::AuthorClient) with CRUD and derived queries.
//! - **[lifecycle]**: [`CatalogSystem`](lifecycle::CatalogSystem), startup and shutdown.
//! - **[config]**: environment-driven settings.
//! - **[seed]**: the sample dataset used by the demo binary.
//!
//! ## Testing
//!
//! See [`spec_framework::mock`] for utilities to test clients without spawning actors.

pub mod author_actor;
pub mod clients;
pub mod config;
pub mod filter;
pub mod lifecycle;
pub mod model;
pub mod seed;
pub mod specification;
