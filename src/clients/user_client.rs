//! # User Client
use crate::model::{User, UserCreate, UserId};
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(UserError::from)
    }

    /// Looks up `id`, turning absence into [`UserError::NotFound`].
    #[instrument(skip(self))]
    pub async fn require(&self, id: UserId) -> Result<User, UserError> {
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::from(e)
    }
}
