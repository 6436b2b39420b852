//! # ActorEntity Trait
//!
//! The contract an entity implements to be stored by a [`ResourceActor`](crate::ResourceActor)
//! and queried with [`Specification`](crate::Specification)s.
//!
//! An entity is a [`Record`], so the executor can read its attributes and
//! walk its relations by name. On top of that it declares its identifier,
//! its create/update payloads, optional custom actions and the lifecycle
//! hooks the actor calls around every state change.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::unique_keys`]
//!
//! The hooks default to `Ok(())`, `unique_keys` to no keys.

use crate::record::{Record, Value};
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any stored entity must implement.
///
/// # Async & Context
/// Hooks are `async` and receive the actor's `Context`, which is injected
/// at `run()` time rather than at construction.
#[async_trait]
pub trait ActorEntity: Record + Clone + Send + Sync + 'static {
    /// Identifier assigned by the actor from a sequence starting at 1.
    ///
    /// `Ord` because the store iterates in id order, which is also the
    /// insertion order and the tie-breaker for sorted queries.
    type Id: Ord + Eq + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload applied to an existing instance.
    type Update: Send + Sync + Debug;

    /// Entity-specific operations that do not fit CRUD.
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum for every hook of this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its assigned id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed, including removals by
    /// [`ResourceClient::delete_where`](crate::ResourceClient::delete_where).
    /// An error keeps the entity in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Values no two stored entities may share, as `(field, value)` pairs.
    ///
    /// The actor checks them against the rest of the store after `on_create`
    /// and after `on_update`, and rejects the change with
    /// [`FrameworkError::UniqueViolation`](crate::FrameworkError::UniqueViolation).
    fn unique_keys(&self) -> Vec<(&'static str, Value)> {
        Vec::new()
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
