//! Driving port for user reads.
//!
//! Inbound adapters depend on this trait rather than on the repository so
//! that handlers only ever see domain [`Error`] values.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user in storage order; empty when there are none.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with `id`, or the zero-valued [`User`] when no row
    /// matches.
    async fn find_user(&self, id: UserId) -> Result<User, Error>;
}
