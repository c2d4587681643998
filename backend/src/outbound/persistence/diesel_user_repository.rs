//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each method checks out one pooled connection, runs one statement under
//! the pool's statement deadline, and drops the connection back into the
//! pool on every path.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDetails, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a statement under the pool deadline and map its errors.
    async fn run<T, F>(&self, statement: F) -> Result<T, UserPersistenceError>
    where
        F: Future<Output = Result<T, diesel::result::Error>>,
    {
        match self.pool.within_deadline(statement).await {
            Some(result) => result.map_err(map_diesel_error),
            None => Err(UserPersistenceError::execute("statement deadline elapsed")),
        }
    }
}

/// Storage keys are `INT4`; identifiers above `i32::MAX` cannot be stored.
fn storage_key(id: UserId) -> Option<i32> {
    i32::try_from(id.get()).ok()
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow { id, name, email } = row;
    let id = u32::try_from(id)
        .map_err(|_| UserPersistenceError::scan(format!("stored id {id} is negative")))?;
    Ok(User::new(UserId::new(id), UserDetails { name, email }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, details: &UserDetails) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            name: &details.name,
            email: &details.email,
        };
        let id: i32 = self
            .run(async {
                diesel::insert_into(users::table)
                    .values(&new_row)
                    .returning(users::id)
                    .get_result(&mut conn)
                    .await
            })
            .await?;

        u32::try_from(id)
            .map(UserId::new)
            .map_err(|_| UserPersistenceError::insert_id(format!("assigned id {id} is negative")))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = self
            .run(async {
                users::table
                    .select(UserRow::as_select())
                    .load(&mut conn)
                    .await
            })
            .await?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(key) = storage_key(id) else {
            debug!(%id, "id outside storage range; no row can match");
            return Ok(None);
        };

        let row: Option<UserRow> = self
            .run(async {
                users::table
                    .filter(users::id.eq(key))
                    .select(UserRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
            })
            .await?;

        row.map(row_to_user).transpose()
    }

    async fn update(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<usize, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(key) = storage_key(id) else {
            return Ok(0);
        };

        let changeset = UserUpdate {
            name: &details.name,
            email: &details.email,
        };
        self.run(async {
            diesel::update(users::table.filter(users::id.eq(key)))
                .set(&changeset)
                .execute(&mut conn)
                .await
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<usize, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(key) = storage_key(id) else {
            return Ok(0);
        };

        self.run(async {
            diesel::delete(users::table.filter(users::id.eq(key)))
                .execute(&mut conn)
                .await
        })
        .await
    }
}
