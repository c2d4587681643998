//! User data model.
//!
//! A user is an `id` assigned by storage plus a free-form `name` and `email`.
//! Neither string is validated; an empty or malformed email is stored as
//! given.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Error returned when a path segment is not a valid [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    /// The segment was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The segment contained something other than ASCII digits.
    #[error("user id must contain only decimal digits")]
    NotDecimal,
    /// The value does not fit in 32 bits.
    #[error("user id must fit in 32 bits")]
    OutOfRange,
}

/// Storage-assigned user identifier.
///
/// The zero value never names a stored row; it is what an absent user
/// serialises with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct UserId(u32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    /// Parse a base-10 identifier. Signs and whitespace are rejected.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// assert_eq!("42".parse::<UserId>().map(UserId::get), Ok(42));
    /// assert!("+42".parse::<UserId>().is_err());
    /// assert!("4294967296".parse::<UserId>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(UserIdParseError::Empty);
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UserIdParseError::NotDecimal);
        }
        raw.parse::<u32>()
            .map(Self)
            .map_err(|_| UserIdParseError::OutOfRange)
    }
}

/// Mutable user fields supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
}

impl UserDetails {
    /// Bundle a name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Application user.
///
/// Serialises as `{"id":1,"name":"Ana","email":"ana@x.com"}`. The
/// [`Default`] value (`id` 0, empty strings) is returned for lookups that
/// match no row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    /// Build a user from its identifier and details.
    #[must_use]
    pub fn new(id: UserId, details: UserDetails) -> Self {
        let UserDetails { name, email } = details;
        Self { id, name, email }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
