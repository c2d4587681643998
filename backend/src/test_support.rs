//! Test utilities for the users crate.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration tests under `tests/`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDetails, UserId};

#[derive(Debug)]
struct Table {
    rows: Vec<User>,
    next_id: u32,
    failures: VecDeque<UserPersistenceError>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
            failures: VecDeque::new(),
        }
    }
}

/// In-memory [`UserRepository`] with serial ids starting at 1.
///
/// Rows are kept in insertion order, matching how a heap table without an
/// `ORDER BY` tends to return them. Failures queued with
/// [`InMemoryUserRepository::fail_next`] are returned by the next calls in
/// FIFO order, one per call, without touching the rows.
///
/// # Examples
/// ```
/// use users_api::domain::ports::UserRepository;
/// use users_api::domain::UserDetails;
/// use users_api::test_support::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::default();
/// let id = repo.insert(&UserDetails::new("Ana", "ana@x.com")).await.unwrap();
/// assert_eq!(id.get(), 1);
/// assert_eq!(repo.snapshot().len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    /// Queue a failure for the next repository call.
    pub fn fail_next(&self, error: UserPersistenceError) {
        self.lock().failures.push_back(error);
    }

    /// Copy of the current rows in storage order.
    pub fn snapshot(&self) -> Vec<User> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        match self.table.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn with_table<T>(
        &self,
        op: impl FnOnce(&mut Table) -> T,
    ) -> Result<T, UserPersistenceError> {
        let mut table = self.lock();
        if let Some(error) = table.failures.pop_front() {
            return Err(error);
        }
        Ok(op(&mut table))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, details: &UserDetails) -> Result<UserId, UserPersistenceError> {
        self.with_table(|table| {
            let id = UserId::new(table.next_id);
            table.next_id += 1;
            table.rows.push(User::new(id, details.clone()));
            id
        })
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.with_table(|table| table.rows.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_table(|table| table.rows.iter().find(|user| user.id() == id).cloned())
    }

    async fn update(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<usize, UserPersistenceError> {
        self.with_table(|table| {
            let mut affected = 0;
            for row in table.rows.iter_mut().filter(|user| user.id() == id) {
                *row = User::new(id, details.clone());
                affected += 1;
            }
            affected
        })
    }

    async fn delete(&self, id: UserId) -> Result<usize, UserPersistenceError> {
        self.with_table(|table| {
            let before = table.rows.len();
            table.rows.retain(|user| user.id() != id);
            before - table.rows.len()
        })
    }
}
