//! # Generic Actor Server
//!
//! `ResourceActor<T>` is the server half of a resource: it exclusively owns the
//! store for one entity type and answers requests one at a time.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// The actor task is the only owner of `store`. Every request is handled to
/// completion before the next is received, including the `await`s inside
/// entity hooks. Any check-then-mutate performed by a single hook or action is
/// therefore a conditional update: no other request for this resource type
/// can observe or change the entity in between.
///
/// This is what the marketplace relies on for stock reservation (check stock,
/// decrement) and for order transitions (check status is still open, move it).
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(buffer)` returns the actor and its client.
/// 2. **Wire**: pass dependencies to `actor.run(context)`.
/// 3. **Run**: spawn the returned future on the runtime.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] enum CounterAction { Bump }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = ();
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: 0 })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.value += 1;
///         Ok(self.value)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, CounterAction::Bump).await.unwrap(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mpsc capacity; when it is full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            entity_type: short_type_name::<T>(),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            self.handle(request, &context).await;
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle(&mut self, request: ResourceRequest<T>, context: &T::Context) {
        let entity_type = self.entity_type;
        match request {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let id = T::Id::from(self.next_id);

                let mut item = match T::from_create_params(id.clone(), params) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(entity_type, error = %e, "Create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        return;
                    }
                };
                if let Err(e) = item.on_create(context).await {
                    warn!(entity_type, error = %e, "on_create failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }

                // Ids are only consumed by successful creates.
                self.next_id += 1;
                self.store.insert(id.clone(), item);
                info!(entity_type, %id, size = self.store.len(), "Created");
                let _ = respond_to.send(Ok(id));
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.get(&id).cloned();
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Find { filter, respond_to } => {
                let mut matches: Vec<(&T::Id, &T)> = self
                    .store
                    .iter()
                    .filter(|(_, item)| filter.matches(item))
                    .collect();
                matches.sort_by(|(a, _), (b, _)| a.cmp(b));
                let matches: Vec<T> = matches.into_iter().map(|(_, item)| item.clone()).collect();
                debug!(entity_type, matched = matches.len(), size = self.store.len(), "Find");
                let _ = respond_to.send(Ok(matches));
            }
            ResourceRequest::Update { id, update, respond_to } => {
                debug!(entity_type, %id, ?update, "Update");
                let Some(item) = self.store.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                match item.on_update(update, context).await {
                    Ok(()) => {
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    }
                }
            }
            ResourceRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                let Some(item) = self.store.get(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                if let Err(e) = item.on_delete(context).await {
                    warn!(entity_type, %id, error = %e, "on_delete failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return;
                }
                self.store.remove(&id);
                info!(entity_type, %id, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(()));
            }
            ResourceRequest::Action { id, action, respond_to } => {
                debug!(entity_type, %id, ?action, "Action");
                let Some(item) = self.store.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    return;
                };
                let result = item
                    .handle_action(action, context)
                    .await
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                match &result {
                    Ok(_) => info!(entity_type, %id, "Action ok"),
                    Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }
}

/// Extracts the type name without its module path ("Order" rather than
/// "marketplace::model::order::Order").
fn short_type_name<T>() -> &'static str {
    std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("Unknown")
}
