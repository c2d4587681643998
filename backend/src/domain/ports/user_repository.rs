//! Port abstraction for user persistence adapters and their errors.
//!
//! Every method is a single statement against the users table. Adapters
//! acquire one connection per call and release it before returning.

use async_trait::async_trait;

use crate::domain::{User, UserDetails, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// No connection could be checked out.
        Connection { message: String } => "user repository connection failed: {message}",
        /// The statement could not be built or its parameters bound.
        Prepare { message: String } => "user statement preparation failed: {message}",
        /// The statement failed or timed out while executing.
        Execute { message: String } => "user statement execution failed: {message}",
        /// A result row could not be converted into a domain user.
        Scan { message: String } => "user row conversion failed: {message}",
        /// The identifier assigned by an insert could not be read back.
        InsertId { message: String } => "user insert id unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a row and return the identifier storage assigned to it.
    async fn insert(&self, details: &UserDetails) -> Result<UserId, UserPersistenceError>;

    /// Return every row in storage order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Return the first row whose id matches, if any.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite name and email of the matching row.
    ///
    /// Returns the number of rows affected; zero is not an error.
    async fn update(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<usize, UserPersistenceError>;

    /// Remove the matching row.
    ///
    /// Returns the number of rows affected; zero is not an error.
    async fn delete(&self, id: UserId) -> Result<usize, UserPersistenceError>;
}
