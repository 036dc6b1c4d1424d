//! # Mock Clients & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of a running actor. It lets you test logic *around* a client
//! (domain clients, hooks that call other actors) quickly and deterministically.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real versioned state |
//! | **Use Case** | Unit testing logic *around* the client | Testing the actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! 1. **Client logic test (pure mock)**: wrap `mock.client()` in your domain client and assert
//!    on what it does with canned answers.
//! 2. **Single actor test**: spawn one `ResourceActor` with `()` context.
//! 3. **Actor with mocked dependencies**: spawn the real actor, inject clients built from
//!    `MockClient`s as its context (see `crates/brigade/tests/actor_mock_test.rs`).
//! 4. **Full system test**: start the whole lifecycle orchestrator.
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use resource_actor::mock::MockClient;
//! use resource_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Table { id: u32 }
//! #[derive(Debug)] struct TableCreate;
//! #[derive(Debug)] struct TableUpdate;
//! #[derive(Debug)] enum TableAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct TableError;
//!
//! #[async_trait]
//! impl ActorEntity for Table {
//!     type Id = u32; type Create = TableCreate; type Update = TableUpdate;
//!     type Action = TableAction; type ActionResult = (); type Filter = ();
//!     type Context = (); type Error = TableError;
//!     fn from_create_params(id: u32, _: TableCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: TableUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: TableAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Table>::new();
//!     let client = mock.client();
//!
//!     // Simulate a lost store
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw request receiver, or the fluent
//! [`MockClient`] API.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Versioned};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the canned answer for it.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<Versioned<T>>, FrameworkError>,
    },
    Create {
        response: Result<Versioned<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<Versioned<T>>, FrameworkError>,
    },
    Update {
        response: Result<Versioned<T>, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered; a request that does not match
/// the next expectation panics the mock task, which surfaces as `ActorDropped` to the caller.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
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

    /// Expects a `get` operation. The ID is for readability at the call site only.
    pub fn expect_get(&mut self, _id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            version: 1,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` or `update_if` operation.
    pub fn expect_update(&mut self, _id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, _id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    version: u64,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Reports the returned record at `version` instead of 1.
    pub fn at_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn return_ok(self, value: Option<T>) {
        let version = self.version;
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            response: Ok(value.map(|entity| Versioned { version, entity })),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Get { response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, entity: T) {
        self.expectations.lock().unwrap().push_back(Expectation::Create {
            response: Ok(Versioned { version: 1, entity }),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Err(error) });
    }
}

/// Builder for `list` expectations. Returned records are all at version 1.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, entities: Vec<T>) {
        let records = entities
            .into_iter()
            .map(|entity| Versioned { version: 1, entity })
            .collect();
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List { response: Ok(records) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List { response: Err(error) });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, record: Versioned<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Update { response: Ok(record) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Update { response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Err(error) });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// Use this when a test needs to inspect the request payload itself (e.g. which version an
/// `update_if` was conditioned on) before answering it.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    oneshot::Sender<Result<Option<Versioned<T>>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
#[allow(clippy::type_complexity)]
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request.
///
/// Yields the target ID, the update payload, and the version it was conditioned on.
#[allow(clippy::type_complexity)]
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Update,
    Option<u64>,
    oneshot::Sender<Result<Versioned<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            expected_version,
            respond_to,
        }) => Some((id, update, expected_version, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Table {
        id: u32,
        seats: u32,
    }

    #[derive(Debug)]
    struct TableCreate {
        seats: u32,
    }

    #[derive(Debug)]
    struct TableUpdate {
        seats: u32,
    }

    #[derive(Debug)]
    enum TableAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Table error")]
    struct TableError;

    #[async_trait]
    impl ActorEntity for Table {
        type Id = u32;
        type Create = TableCreate;
        type Update = TableUpdate;
        type Action = TableAction;
        type ActionResult = ();
        type Filter = ();
        type Context = ();
        type Error = TableError;

        fn from_create_params(id: u32, params: TableCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                seats: params.seats,
            })
        }

        fn matches(&self, _filter: &()) -> bool {
            true
        }

        async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), Self::Error> {
            self.seats = update.seats;
            Ok(())
        }

        async fn handle_action(&mut self, action: TableAction, _ctx: &()) -> Result<(), Self::Error> {
            match action {}
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_conditional_version() {
        let (client, mut receiver) = create_mock_client::<Table>(10);

        let update_task =
            tokio::spawn(async move { client.update_if(7, 3, TableUpdate { seats: 2 }).await });

        let (id, update, expected, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, 7);
        assert_eq!(update.seats, 2);
        assert_eq!(expected, Some(3));
        responder
            .send(Err(FrameworkError::Conflict {
                id: "7".into(),
                expected: 3,
                actual: 4,
            }))
            .unwrap();

        let result = update_task.await.unwrap();
        assert!(matches!(result, Err(FrameworkError::Conflict { actual: 4, .. })));
    }

    #[tokio::test]
    async fn test_raw_receiver_get() {
        let (client, mut receiver) = create_mock_client::<Table>(10);
        let get_task = tokio::spawn(async move { client.get(1).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 1);
        responder.send(Ok(None)).unwrap();

        assert!(get_task.await.unwrap().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Table>::new();

        mock.expect_create().return_ok(Table { id: 1, seats: 4 });
        mock.expect_get(1)
            .at_version(3)
            .return_ok(Some(Table { id: 1, seats: 4 }));
        mock.expect_list().return_ok(vec![Table { id: 1, seats: 4 }]);

        let client = mock.client();

        let created = client.create(TableCreate { seats: 4 }).await.unwrap();
        assert_eq!(created.version, 1);

        let fetched = client.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.version, 3);
        assert_eq!(fetched.entity.seats, 4);

        let listed = client.list(()).await.unwrap();
        assert_eq!(listed.len(), 1);

        mock.verify();
    }
}
