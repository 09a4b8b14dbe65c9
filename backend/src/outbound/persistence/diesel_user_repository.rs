//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each method is a single statement; affected-row counts distinguish a
//! missing user from a successful write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserEmailUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from_strings(row.id, row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored user is invalid: {err}")))
}

fn require_affected(affected: usize, id: &UserId) -> Result<(), UserPersistenceError> {
    if affected == 0 {
        Err(UserPersistenceError::not_found(id.as_ref()))
    } else {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: user.id().as_ref(),
            email: user.email().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::conflict(user.id().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn update_email(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserEmailUpdate {
            email: user.email().as_ref(),
        };

        let affected = diesel::update(users::table.filter(users::id.eq(user.id().as_ref())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        require_affected(affected, user.id())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(users::table.filter(users::id.eq(id.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        require_affected(affected, id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn zero_affected_rows_is_not_found() {
        let id = UserId::new("user_1").expect("valid id");
        assert_eq!(
            require_affected(0, &id),
            Err(UserPersistenceError::not_found("user_1"))
        );
        assert_eq!(require_affected(1, &id), Ok(()));
    }

    #[rstest]
    fn invalid_stored_rows_are_query_errors() {
        let err = row_to_user(UserRow {
            id: "user_1".to_owned(),
            email: "not-an-email".to_owned(),
        })
        .expect_err("invalid email");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
