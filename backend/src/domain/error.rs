//! Domain-level error types.
//!
//! These errors are transport agnostic. Each [`ErrorCode`] names the request
//! step that failed and carries the fixed client-facing message for it.
//! Inbound adapters decide how a code becomes a status line.

use crate::domain::TraceId;

/// Stable machine-readable code naming the step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The `{id}` path parameter is not an unsigned 32-bit integer.
    ParameterParse,
    /// The request body stream could not be read.
    BodyRead,
    /// The request body is not a JSON user object.
    JsonDecode,
    /// No database connection could be obtained.
    Connection,
    /// The SQL statement could not be built.
    StatementPrepare,
    /// The SQL statement failed while executing.
    StatementExecute,
    /// The storage-assigned identifier could not be read back.
    InsertId,
    /// A read query failed.
    Query,
    /// A result row could not be converted into a user.
    RowScan,
    /// A response payload could not be serialised.
    JsonEncode,
}

const PARAMETER_PARSE_MESSAGE: &str = "Failed to convert parameter to integer";
const BODY_READ_MESSAGE: &str = "Failed to read request body!";
const JSON_DECODE_MESSAGE: &str = "Failed to unmarshal request body!";
const CONNECTION_MESSAGE: &str = "Failed to connect to the database!";
const STATEMENT_PREPARE_MESSAGE: &str = "Failed to create statement!";
const STATEMENT_EXECUTE_MESSAGE: &str = "Failed to execute statement!";
const INSERT_ID_MESSAGE: &str = "Failed to retrieve last insert ID!";
const ROW_SCAN_MESSAGE: &str = "Failed to scan users!";

/// Domain error payload.
///
/// ## Invariants
/// - `message` is one of the fixed step messages; it never contains driver
///   or parser output, so it is always safe to return to clients.
/// - `trace_id` is captured from the ambient [`TraceId`] at construction.
///
/// # Examples
/// ```
/// use users_api::domain::{Error, ErrorCode};
///
/// let err = Error::connection();
/// assert_eq!(err.code(), ErrorCode::Connection);
/// assert_eq!(err.message(), "Failed to connect to the database!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create an error for `code` with a caller-supplied message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier active when the error was raised, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::ParameterParse`].
    #[must_use]
    pub fn parameter_parse() -> Self {
        Self::new(ErrorCode::ParameterParse, PARAMETER_PARSE_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::BodyRead`].
    #[must_use]
    pub fn body_read() -> Self {
        Self::new(ErrorCode::BodyRead, BODY_READ_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::JsonDecode`].
    #[must_use]
    pub fn json_decode() -> Self {
        Self::new(ErrorCode::JsonDecode, JSON_DECODE_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::Connection`].
    #[must_use]
    pub fn connection() -> Self {
        Self::new(ErrorCode::Connection, CONNECTION_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::StatementPrepare`].
    #[must_use]
    pub fn statement_prepare() -> Self {
        Self::new(ErrorCode::StatementPrepare, STATEMENT_PREPARE_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::StatementExecute`].
    #[must_use]
    pub fn statement_execute() -> Self {
        Self::new(ErrorCode::StatementExecute, STATEMENT_EXECUTE_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::InsertId`].
    #[must_use]
    pub fn insert_id() -> Self {
        Self::new(ErrorCode::InsertId, INSERT_ID_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::Query`].
    ///
    /// Read failures name what was being read, so the message is supplied
    /// by the caller.
    pub fn query(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Query, message)
    }

    /// Convenience constructor for [`ErrorCode::RowScan`].
    #[must_use]
    pub fn row_scan() -> Self {
        Self::new(ErrorCode::RowScan, ROW_SCAN_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::JsonEncode`].
    pub fn json_encode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::JsonEncode, message)
    }
}
