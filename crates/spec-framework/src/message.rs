//! # Generic Messages
//!
//! Requests sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor), each carrying a one-shot reply channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::page::{Page, Pageable};
use crate::specification::Specification;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Everything a resource actor can be asked to do.
///
/// - **Create / Get / Update / Delete**: single-entity lifecycle by id.
/// - **Action**: entity-specific operation, see [`ActorEntity::Action`].
/// - **Query / Count**: read the records matching a [`Specification`].
/// - **DeleteWhere**: remove every record matching a [`Specification`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Query {
        spec: Specification<T>,
        pageable: Pageable,
        respond_to: Response<Page<T>>,
    },
    Count {
        spec: Specification<T>,
        respond_to: Response<usize>,
    },
    DeleteWhere {
        spec: Specification<T>,
        respond_to: Response<usize>,
    },
}
