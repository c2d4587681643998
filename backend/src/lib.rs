//! Users API library.
//!
//! Hexagonal layout: `domain` holds the user model, error taxonomy, ports and
//! the user service; `inbound::http` adapts those ports to actix-web handlers;
//! `outbound::persistence` implements the repository port with Diesel over a
//! pooled PostgreSQL connection.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
