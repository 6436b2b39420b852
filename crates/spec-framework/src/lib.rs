//! # Spec Framework
//!
//! Composable, null-tolerant query specifications over entities held by
//! in-memory resource actors.
//!
//! A [`Specification<T>`] is a reusable criterion. Given a fresh
//! [`CriteriaQuery`] it yields an optional [`Predicate`]: `None` means the
//! criterion was absent and constrains nothing. Specifications compose with
//! `and` / `or` / `not` and [`Specification::all_of`], so a filter with any
//! subset of optional fields turns into exactly the conjunction of the
//! fields that are present.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`], [`Record`]) - domain models expose
//!    their attributes and relations by name.
//! 2. **Query Layer** ([`Specification`], [`Predicate`], [`CriteriaQuery`],
//!    [`Pageable`]) - pure descriptions of what to select and how to order it.
//! 3. **Runtime Layer** ([`ResourceActor`]) - owns the store and runs every
//!    query through the [`executor`].
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - async,
//!    type-safe access from any task.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - A query sees a consistent snapshot of the store
//! - Specifications are `Send + Sync` and can be built once and shared
//!
//! ## Absent Criteria
//!
//! The null-skipping factories decide when a criterion is a no-op, so
//! callers never branch on optional inputs:
//!
//! ```rust
//! use spec_framework::{CriteriaQuery, Specification};
//!
//! struct Author;
//!
//! let spec = Specification::<Author>::all_of([
//!     Specification::by_pattern_field("first_name", None),
//!     Specification::by_range_lower_bound("age", Some(0)),
//!     Specification::by_pattern_field("email", Some("GMAIL")),
//! ]);
//! let predicate = spec.to_predicate(&mut CriteriaQuery::new());
//! assert_eq!(predicate.unwrap().to_string(), "lower(email) like '%gmail%'");
//! ```
//!
//! ## Testing
//!
//! [`MockClient`](mock::MockClient) hands out a real `ResourceClient<T>`
//! answered from scripted replies, for unit tests of client wrappers without
//! spawning an actor. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod criteria;
pub mod entity;
pub mod error;
pub mod executor;
pub mod message;
pub mod mock;
pub mod page;
pub mod predicate;
pub mod record;
pub mod specification;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use criteria::{CriteriaQuery, Join, JoinType};
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use page::{Direction, Page, Pageable, Sort, SortOrder};
pub use predicate::{CompareOp, FieldRef, Predicate, Row, TextOp};
pub use record::{Record, Value};
pub use specification::Specification;
