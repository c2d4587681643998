//! HTTP adapter mapping for domain errors.
//!
//! Every domain failure becomes `500 Internal Server Error` with the fixed
//! step message as a `text/plain` body. Existing clients match on those
//! messages, so request-side failures (bad id, bad JSON) share the status.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use tracing::warn;

use crate::domain::{Error, TRACE_ID_HEADER, is_storage_failure};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        // Storage failures were logged with their cause by the user service.
        if !is_storage_failure(self.code()) {
            warn!(
                code = ?self.code(),
                trace_id = self.trace_id(),
                "{}",
                self.message()
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        builder.content_type(ContentType::plaintext());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(self.message().to_owned())
    }
}
