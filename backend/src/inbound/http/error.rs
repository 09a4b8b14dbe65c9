//! Domain errors as HTTP responses.
//!
//! Every failure leaves the adapter as the JSON `Error` body with a status
//! derived from its [`ErrorCode`]. Internal errors are reduced to a generic
//! message so storage causes never reach clients. Malformed JSON bodies and
//! query strings are turned into `invalid_request` errors by the extractor
//! configs below instead of actix's plain-text defaults.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const REDACTED_MESSAGE: &str = "Internal server error";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(public_view(self))
    }
}

/// The body clients see: internal errors keep only their trace id.
fn public_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    match error.trace_id() {
        Some(id) => Error::internal(REDACTED_MESSAGE).with_trace_id(id.to_owned()),
        None => Error::internal(REDACTED_MESSAGE),
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

fn payload_error(source: &'static str, reason: String) -> actix_web::Error {
    debug!(source, reason = %reason, "rejected malformed request payload");
    Error::invalid_request(format!("Malformed {source}."))
        .with_details(json!({ "source": source, "reason": reason }))
        .into()
}

/// JSON body extractor config answering malformed bodies with `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            payload_error("body", err.to_string())
        })
}

/// Query string extractor config answering bad parameters with `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            payload_error("query", err.to_string())
        })
}
