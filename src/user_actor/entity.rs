//! [`ActorEntity`] implementation for [`User`].

use crate::model::{User, UserCreate, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;

use super::UserError;

/// Users have no domain actions.
#[derive(Debug)]
pub enum UserAction {}

fn validate_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::ValidationError("name must not be empty".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::ValidationError(format!(
            "invalid email address: {email}"
        ))),
    }
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = ();
    type Action = UserAction;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_email(&params.email)?;
        Ok(User::new(id, params))
    }

    /// Users are fixed once registered.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(UserError::ValidationError(format!("{} cannot be edited", self.id)))
    }

    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
