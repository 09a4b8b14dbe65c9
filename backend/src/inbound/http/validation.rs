//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and body values are parsed into domain primitives here so handlers
//! only see validated types. Failures carry `{field, value, code}` details.

use serde_json::json;

use crate::domain::{
    CollectionId, CollectionName, CollectionValidationError, Error, ImageId, ImageValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    EmptyName,
    NameTooLong,
    EmptyImageId,
    ImageIdTooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::NameTooLong => "name_too_long",
            ErrorCode::EmptyImageId => "empty_image_id",
            ErrorCode::ImageIdTooLong => "image_id_too_long",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_field(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_collection_id(value: &str, field: FieldName) -> Result<CollectionId, Error> {
    CollectionId::parse(value).map_err(|_| {
        invalid_field(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_image_id(value: &str, field: FieldName) -> Result<ImageId, Error> {
    ImageId::new(value).map_err(|err| {
        let code = match err {
            ImageValidationError::EmptyId => ErrorCode::EmptyImageId,
            ImageValidationError::IdTooLong { .. } => ErrorCode::ImageIdTooLong,
        };
        invalid_field(field, err.to_string(), code, value)
    })
}

pub(crate) fn parse_collection_name(value: &str, field: FieldName) -> Result<CollectionName, Error> {
    CollectionName::new(value).map_err(|err| {
        let code = match err {
            CollectionValidationError::NameTooLong { .. } => ErrorCode::NameTooLong,
            CollectionValidationError::EmptyName | CollectionValidationError::InvalidId => {
                ErrorCode::EmptyName
            }
        };
        invalid_field(field, err.to_string(), code, value)
    })
}
