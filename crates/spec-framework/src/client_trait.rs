//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default lookups and
//! specification queries built on top of a generic `ResourceClient`, with
//! framework errors mapped into the resource's own error type.
use crate::{ActorEntity, FrameworkError, Page, Pageable, ResourceClient, Specification};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// Implementors supply the inner client and an error mapping; `get`,
/// `delete`, `find_all`, `find_page` and `count` come for free.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Author> for AuthorClient {
///     type Error = AuthorError;
///
///     fn inner(&self) -> &ResourceClient<Author> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         AuthorError::from(e)
///     }
/// }
///
/// let adults = client.count(Specification::by_range_lower_bound("age", Some(18))).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Every entity matching `spec`, in id order.
    #[tracing::instrument(skip(self))]
    async fn find_all(&self, spec: Specification<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find_all(spec).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn find_page(
        &self,
        spec: Specification<T>,
        pageable: Pageable,
    ) -> Result<Page<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .find_page(spec, pageable)
            .await
            .map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, spec: Specification<T>) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().count(spec).await.map_err(Self::map_error)
    }
}
