//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, UserDetails, UserId};

/// Domain use-case port for creating, updating, and deleting users.
///
/// Update and delete succeed even when no row matches `id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return its assigned identifier.
    async fn create_user(&self, details: UserDetails) -> Result<UserId, Error>;

    /// Replace name and email of the user with `id`.
    async fn update_user(&self, id: UserId, details: UserDetails) -> Result<(), Error>;

    /// Permanently remove the user with `id`.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
