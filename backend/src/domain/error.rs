//! The error every gallery operation returns.
//!
//! It carries no transport detail: the HTTP adapter maps [`ErrorCode`] to a
//! status and serialises the payload as the JSON error body. The trace id in
//! scope at construction is captured so a body can be matched to its logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Failure category, serialised in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input or a failed validation.
    InvalidRequest,
    /// The request carried no signed-in user.
    Unauthorized,
    /// Absent, or owned by somebody else.
    NotFound,
    /// The write collides with an existing row.
    Conflict,
    /// PostgreSQL or Unsplash could not be reached.
    ServiceUnavailable,
    InternalError,
}

/// Error payload: code, message, optional trace id and details.
///
/// ```
/// use gallery::domain::{Error, ErrorCode};
/// use serde_json::json;
///
/// let err = Error::invalid_request("name must not be empty")
///     .with_details(json!({ "field": "name" }));
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.details(), Some(&json!({ "field": "name" })));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "Collection not found or access denied.")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    details: Option<Value>,
}

macro_rules! error_constructors {
    ($($ctor:ident => $code:ident),+ $(,)?) => {
        $(
            #[doc = concat!("An [`ErrorCode::", stringify!($code), "`] error.")]
            pub fn $ctor(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    /// Build an error stamped with [`TraceId::current`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    error_constructors! {
        invalid_request => InvalidRequest,
        unauthorized => Unauthorized,
        not_found => NotFound,
        conflict => Conflict,
        service_unavailable => ServiceUnavailable,
        internal => InternalError,
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the captured trace id, e.g. when redacting a copy.
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
