//! # Mock Clients for Testing
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a running actor.
//! Use it to isolate the code under test from its dependencies, and to inject
//! failures that a real actor would not produce on demand (a closed channel
//! in the middle of a multi-step operation, for instance).
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | none, replies are scripted | real store |
//! | Error injection | `return_err(..)` | needs a crafted state |
//! | Use case | logic *around* a client | the actor or the whole system |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (wrong kind or wrong id) is recorded and reported by
//! [`MockClient::verify`], which also fails if expectations remain unused.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Bin { id: u32 }
//! #[derive(Debug)] struct BinCreate;
//! #[derive(Debug)] enum BinAction {}
//! #[derive(Debug, thiserror::Error)] #[error("bin error")] struct BinError;
//!
//! #[async_trait]
//! impl ActorEntity for Bin {
//!     type Id = u32; type Create = BinCreate; type Update = ();
//!     type Action = BinAction; type ActionResult = (); type Context = (); type Error = BinError;
//!     fn from_create_params(id: u32, _: BinCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: BinAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Bin>::new();
//!     mock.expect_get(1).return_ok(Some(Bin { id: 1 }));
//!     mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().is_some());
//!     assert!(matches!(client.create(BinCreate).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! For tests that need to inspect the request payload, [`create_mock_client`]
//! returns the raw receiver and the `expect_*` helpers pull typed requests off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// One scripted reply, queued by the `expect_*` builders.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Find {
        response: Result<Vec<T>, FrameworkError>,
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
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "get",
            Expectation::Find { .. } => "find",
            Expectation::Create { .. } => "create",
            Expectation::Update { .. } => "update",
            Expectation::Delete { .. } => "delete",
            Expectation::Action { .. } => "action",
        }
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type SharedState<T> = Arc<Mutex<MockState<T>>>;

fn push<T: ActorEntity>(state: &SharedState<T>, expectation: Expectation<T>) {
    state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .expectations
        .push_back(expectation);
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: SharedState<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called from
    /// within a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: SharedState<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut guard = task_state
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                let expectation = guard.expectations.pop_front();
                if let Err(failure) = answer(request, expectation) {
                    guard.failures.push(failure);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    pub fn expect_find(&mut self) -> FindExpectationBuilder<T> {
        FindExpectationBuilder {
            state: self.state.clone(),
        }
    }

    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            state: self.state.clone(),
        }
    }

    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Panics if any request did not match its expectation or if scripted
    /// expectations were left unused.
    pub fn verify(&self) {
        let guard = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !guard.failures.is_empty() {
            panic!("Mock received unexpected requests: {:?}", guard.failures);
        }
        if !guard.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                guard.expectations.len()
            );
        }
    }
}

/// Replies to `request` from `expectation`, or describes the mismatch. On a
/// mismatch the responder is dropped, so the caller sees `ActorDropped`.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    fn check_id<I: PartialEq + std::fmt::Debug>(expected: &I, got: &I) -> Result<(), String> {
        if expected == got {
            Ok(())
        } else {
            Err(format!("expected id {:?}, got {:?}", expected, got))
        }
    }

    match (request, expectation) {
        (
            ResourceRequest::Get { id, respond_to },
            Some(Expectation::Get { id: want, response }),
        ) => {
            check_id(&want, &id)?;
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Find { respond_to, .. }, Some(Expectation::Find { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: want, response }),
        ) => {
            check_id(&want, &id)?;
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            check_id(&want, &id)?;
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            check_id(&want, &id)?;
            let _ = respond_to.send(response);
        }
        (request, Some(expectation)) => {
            return Err(format!(
                "expected {} request, got {}",
                expectation.kind(),
                request.kind()
            ));
        }
        (request, None) => {
            return Err(format!("unexpected {} request", request.kind()));
        }
    }
    Ok(())
}

pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: SharedState<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        push(&self.state, Expectation::Get { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Get { id: self.id, response: Err(error) });
    }
}

pub struct FindExpectationBuilder<T: ActorEntity> {
    state: SharedState<T>,
}

impl<T: ActorEntity> FindExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        push(&self.state, Expectation::Find { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Find { response: Err(error) });
    }
}

pub struct CreateExpectationBuilder<T: ActorEntity> {
    state: SharedState<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        push(&self.state, Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Create { response: Err(error) });
    }
}

pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: SharedState<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        push(&self.state, Expectation::Update { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Update { id: self.id, response: Err(error) });
    }
}

pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: SharedState<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        push(&self.state, Expectation::Delete { id: self.id, response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Delete { id: self.id, response: Err(error) });
    }
}

pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    state: SharedState<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.state, Expectation::Action { id: self.id, response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.state, Expectation::Action { id: self.id, response: Err(error) });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: pull requests with [`expect_action`] and friends,
/// assert on the payload, then answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
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
