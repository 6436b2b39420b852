//! # Mock Framework & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted replies instead of a running actor. Use
//! it to test code that sits *around* a client (domain clients, derived
//! queries, error mapping) without spawning a store.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, replies are scripted | Real store, real specification execution |
//! | **Determinism** | Fully deterministic | Deterministic, but needs `tokio::spawn` |
//! | **Use Case** | Client wrappers, error mapping | Specification semantics, paging, end-to-end |
//! | **Error Injection** | `return_err(...)` | Needs a state that actually fails |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Author>::new();
//! mock.expect_count().return_ok(3);
//! mock.expect_get(AuthorId(1)).return_err(FrameworkError::ActorClosed);
//!
//! let client = AuthorClient::new(mock.client());
//! assert_eq!(client.count_by_age_greater_than(30).await?, 3);
//! assert!(client.get(AuthorId(1)).await.is_err());
//! mock.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation panics the mock task, which the caller observes as
//! [`FrameworkError::ActorDropped`].
//!
//! For lower-level assertions on the raw messages, use [`create_mock_client`]
//! with [`expect_query`] / [`expect_create`].

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::page::{Page, Pageable};
use crate::specification::Specification;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted reply for the next request.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Query {
        response: Result<Page<T>, FrameworkError>,
    },
    Count {
        response: Result<usize, FrameworkError>,
    },
    DeleteWhere {
        response: Result<usize, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: expected, response })) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: expected, response })) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: expected, response })) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Count { respond_to, .. }, Some(Expectation::Count { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::DeleteWhere { respond_to, .. }, Some(Expectation::DeleteWhere { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Expects a specification query (`find_page`, `find_all`, `find_one`).
    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Page<T>> {
        self.builder(|response| Expectation::Query { response })
    }

    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Count { response })
    }

    pub fn expect_delete_where(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::DeleteWhere { response })
    }

    /// Panics if any scripted reply was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }
}

/// Completes an expectation with the reply the mock should send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on the returned receiver.
///
/// The test plays the actor: receive a request with one of the `expect_*`
/// helpers below, inspect its payload, and answer through `respond_to`.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Query request.
pub async fn expect_query<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Specification<T>,
    Pageable,
    oneshot::Sender<Result<Page<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query {
            spec,
            pageable,
            respond_to,
        }) => Some((spec, pageable, respond_to)),
        _ => None,
    }
}
