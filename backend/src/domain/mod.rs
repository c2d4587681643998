//! Domain primitives, ports, and services.
//!
//! Purpose: define the user entity, the step-specific error taxonomy, and
//! the driving/driven ports that separate HTTP handling from persistence.
//! Nothing in this module knows about Actix or Diesel.
//!
//! Public surface:
//! - [`User`], [`UserId`], [`UserDetails`]: the user entity and its parts.
//! - [`Error`], [`ErrorCode`]: failures named by the step that produced them.
//! - [`UserService`]: implements [`ports::UsersQuery`] and
//!   [`ports::UsersCommand`] over a [`ports::UserRepository`].
//! - [`TraceId`]: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDetails, UserId, UserIdParseError};
pub use self::user_service::{UserService, is_storage_failure};
