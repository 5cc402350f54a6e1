//! # Generic Messages
//!
//! Requests travel from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor) over an mpsc channel and carry a
//! oneshot sender for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A predicate evaluated inside the actor against every stored entity.
///
/// Because the actor evaluates it between two messages, the returned snapshot
/// is consistent: no mutation can interleave with the scan.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    /// A filter that matches every entity.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants are the resource lifecycle (Create, Get, Update, Delete), a
/// read-only `Find` scan, and `Action` for entity-specific commands such as
/// reserving stock or moving an order to a new status. `Action` is the unit
/// of atomicity: its handler runs to completion before the next message is
/// read, so check-then-mutate inside one action cannot race.
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
    Find {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
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
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the request kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::Find { .. } => "find",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
            ResourceRequest::Action { .. } => "action",
        }
    }
}
