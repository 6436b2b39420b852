//! # Generic Client
//!
//! The sending half of a [`ResourceActor`](crate::ResourceActor): one async
//! method per request kind, each awaiting a one-shot reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::page::{Page, Pageable};
use crate::specification::Specification;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across
/// tasks. A closed mailbox surfaces as [`FrameworkError::ActorClosed`], a
/// reply channel dropped mid-request as [`FrameworkError::ActorDropped`].
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// One page of the records matching `spec`.
    pub async fn find_page(
        &self,
        spec: Specification<T>,
        pageable: Pageable,
    ) -> Result<Page<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Query {
            spec,
            pageable,
            respond_to,
        })
        .await
    }

    /// Every record matching `spec`, in id order.
    pub async fn find_all(&self, spec: Specification<T>) -> Result<Vec<T>, FrameworkError> {
        Ok(self.find_page(spec, Pageable::unpaged()).await?.content)
    }

    /// The single record matching `spec`.
    ///
    /// More than one match is an [`FrameworkError::InvalidArgument`].
    pub async fn find_one(&self, spec: Specification<T>) -> Result<Option<T>, FrameworkError> {
        let mut matches = self.find_all(spec).await?;
        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(FrameworkError::InvalidArgument(format!(
                "query did not return a unique result: {n}"
            ))),
        }
    }

    pub async fn count(&self, spec: Specification<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { spec, respond_to })
            .await
    }

    pub async fn exists(&self, spec: Specification<T>) -> Result<bool, FrameworkError> {
        Ok(self.count(spec).await? > 0)
    }

    /// Removes every record matching `spec` and returns how many were removed.
    pub async fn delete_where(&self, spec: Specification<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::DeleteWhere { spec, respond_to })
            .await
    }
}
