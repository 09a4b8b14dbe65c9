//! Applies verified identity events to the local user store.
//!
//! One event produces at most one write. There is no retry here: the
//! identity provider redelivers failed events on its own schedule.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    IdentitySyncCommand, SyncOutcome, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, IdentityEvent};

/// Identity sync service implementing [`IdentitySyncCommand`].
#[derive(Clone)]
pub struct IdentitySyncService<U> {
    users: Arc<U>,
}

impl<U> IdentitySyncService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Conflict { id } => {
            Error::conflict(format!("user {id} already exists"))
        }
        UserPersistenceError::NotFound { id } => Error::not_found(format!("user {id} not found")),
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U> IdentitySyncCommand for IdentitySyncService<U>
where
    U: UserRepository,
{
    async fn apply(&self, event: IdentityEvent) -> Result<SyncOutcome, Error> {
        match event {
            IdentityEvent::UserCreated(user) => {
                self.users.create(&user).await.map_err(map_user_error)?;
                info!(user_id = %user.id(), "user created");
                Ok(SyncOutcome::Created(user.id().clone()))
            }
            IdentityEvent::UserUpdated(user) => {
                self.users
                    .update_email(&user)
                    .await
                    .map_err(map_user_error)?;
                info!(user_id = %user.id(), "user updated");
                Ok(SyncOutcome::Updated(user.id().clone()))
            }
            IdentityEvent::UserDeleted { id } => {
                self.users.delete(&id).await.map_err(map_user_error)?;
                info!(user_id = %id, "user deleted");
                Ok(SyncOutcome::Deleted(id))
            }
            IdentityEvent::Other { event_type } => {
                info!(event_type = %event_type, "unhandled identity event type");
                Ok(SyncOutcome::Ignored(event_type))
            }
        }
    }
}
