//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same identifier already exists.
        Conflict { id: String } => "user {id} already exists",
        /// No user with the identifier exists.
        NotFound { id: String } => "user {id} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; an existing id is a [`UserPersistenceError::Conflict`].
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace the email of an existing user; never inserts.
    async fn update_email(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Delete a user and, by cascade, everything they own.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// Fixture repository that accepts every write and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn update_email(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn delete(&self, _id: &UserId) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }
}
