//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a store of
//! entities and answers every request against it, including specification
//! queries. Messages are processed sequentially, so the store needs no locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::executor;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel. A [`ResourceClient`] is the other half.
///
/// The store is a `BTreeMap`, so iteration is in id order. Ids come from a
/// counter starting at 1, which makes id order the insertion order and gives
/// queries a deterministic default ordering.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Author>::new(32);
/// tokio::spawn(actor.run(()));
///
/// let id = client.create(params).await?;
/// let page = client.find_page(spec, Pageable::of(0, 10)?).await?;
/// ```
///
/// # Operations
///
/// * **Create**: assigns the next id, builds the entity with `from_create_params`,
///   runs `on_create`, checks `unique_keys` against the store, stores it.
/// * **Get / Update / Delete / Action**: by id, `NotFound` when absent.
/// * **Query / Count**: delegated to the [`executor`](crate::executor).
/// * **DeleteWhere**: resolves the matching ids first, then removes each one
///   whose `on_delete` hook succeeds. Replies with the number removed.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity. When it is full, client calls
    /// wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Author" instead of "author_catalog::model::author::Author"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            if let Err(e) = self.check_unique(&item, None) {
                                warn!(entity_type, error = %e, "Create rejected");
                                let _ = respond_to.send(Err(e));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks mutate a copy so a failed update leaves the stored entity untouched.
                    let mut updated = item.clone();
                    if let Err(e) = updated.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Err(e) = self.check_unique(&updated, Some(&id)) {
                        warn!(entity_type, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    self.store.insert(id.clone(), updated.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(updated));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.remove(&id, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Query {
                    spec,
                    pageable,
                    respond_to,
                } => {
                    let result = executor::find_page(&self.store, &spec, &pageable);
                    match &result {
                        Ok(page) => debug!(
                            entity_type,
                            page = page.number,
                            returned = page.number_of_elements(),
                            total = page.total_elements,
                            "Query"
                        ),
                        Err(e) => warn!(entity_type, error = %e, "Query failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Count { spec, respond_to } => {
                    let result = executor::count(&self.store, &spec);
                    match &result {
                        Ok(count) => debug!(entity_type, count, "Count"),
                        Err(e) => warn!(entity_type, error = %e, "Count failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::DeleteWhere { spec, respond_to } => {
                    let ids = match executor::matching_ids(&self.store, &spec) {
                        Ok(ids) => ids,
                        Err(e) => {
                            warn!(entity_type, error = %e, "DeleteWhere failed");
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                    };
                    let mut removed = 0;
                    for id in ids {
                        if self.remove(&id, &context, entity_type).await.is_ok() {
                            removed += 1;
                        }
                    }
                    info!(entity_type, removed, size = self.store.len(), "DeleteWhere");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Fails when another entity, ignoring `own_id`, shares one of `candidate`'s unique keys.
    fn check_unique(&self, candidate: &T, own_id: Option<&T::Id>) -> Result<(), FrameworkError> {
        for (field, value) in candidate.unique_keys() {
            let taken = self
                .store
                .iter()
                .filter(|(id, _)| Some(*id) != own_id)
                .any(|(_, other)| other.field(field).as_ref() == Some(&value));
            if taken {
                return Err(FrameworkError::UniqueViolation {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    async fn remove(
        &mut self,
        id: &T::Id,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<(), FrameworkError> {
        let Some(item) = self.store.get(id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.remove(id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }
}
