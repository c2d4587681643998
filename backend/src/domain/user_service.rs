//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`]. Each
//! call issues exactly one repository statement; persistence failures are
//! logged with their cause and translated into the fixed step errors that
//! clients see.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, ErrorCode, TraceId, User, UserDetails, UserId};

/// The user operation a repository call was made for.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Create,
    List,
    Get(UserId),
    Update,
    Delete,
}

impl Operation {
    fn error_for(self, error: &UserPersistenceError) -> Error {
        match (self, error) {
            (_, UserPersistenceError::Connection { .. }) => Error::connection(),
            (
                Self::List,
                UserPersistenceError::Prepare { .. } | UserPersistenceError::Execute { .. },
            ) => Error::query("Failed to retrieve users!"),
            (
                Self::Get(id),
                UserPersistenceError::Prepare { .. } | UserPersistenceError::Execute { .. },
            ) => Error::query(format!("Failed to retrieve user {id}")),
            (Self::List | Self::Get(_), _) => Error::row_scan(),
            (_, UserPersistenceError::Prepare { .. }) => Error::statement_prepare(),
            (
                Self::Create,
                UserPersistenceError::Scan { .. } | UserPersistenceError::InsertId { .. },
            ) => Error::insert_id(),
            (_, _) => Error::statement_execute(),
        }
    }
}

/// Translate a persistence failure and log its cause once.
fn report(operation: Operation, cause: &UserPersistenceError) -> Error {
    let err = operation.error_for(cause);
    error!(
        operation = ?operation,
        code = ?err.code(),
        trace_id = ?TraceId::current().map(|id| id.to_string()),
        %cause,
        "{}",
        err.message()
    );
    err
}

/// User service implementing both user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list()
            .await
            .map_err(|err| report(Operation::List, &err))
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        let found = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(|err| report(Operation::Get(id), &err))?;
        Ok(found.unwrap_or_default())
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, details: UserDetails) -> Result<UserId, Error> {
        self.user_repo
            .insert(&details)
            .await
            .map_err(|err| report(Operation::Create, &err))
    }

    async fn update_user(&self, id: UserId, details: UserDetails) -> Result<(), Error> {
        let affected = self
            .user_repo
            .update(id, &details)
            .await
            .map_err(|err| report(Operation::Update, &err))?;
        debug!(%id, affected, "user update applied");
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let affected = self
            .user_repo
            .delete(id)
            .await
            .map_err(|err| report(Operation::Delete, &err))?;
        debug!(%id, affected, "user delete applied");
        Ok(())
    }
}

/// Whether `code` reports a failure on the storage side rather than in the
/// request itself.
#[must_use]
pub fn is_storage_failure(code: ErrorCode) -> bool {
    !matches!(
        code,
        ErrorCode::ParameterParse
            | ErrorCode::BodyRead
            | ErrorCode::JsonDecode
            | ErrorCode::JsonEncode
    )
}
