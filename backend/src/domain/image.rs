//! Images referenced by collections.
//!
//! An image row records an external photo (the photo search provider's id)
//! together with the metadata snapshot captured when it was first saved.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Maximum length of an external image reference.
pub const IMAGE_ID_MAX: usize = 255;

/// Validation errors for [`ImageId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    EmptyId,
    IdTooLong { max: usize },
}

impl fmt::Display for ImageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "image id must not be empty"),
            Self::IdTooLong { max } => write!(f, "image id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ImageValidationError {}

/// External reference identifying an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, ImageValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ImageValidationError::EmptyId);
        }
        if id.chars().count() > IMAGE_ID_MAX {
            return Err(ImageValidationError::IdTooLong { max: IMAGE_ID_MAX });
        }
        Ok(Self(id.to_owned()))
    }
}

impl AsRef<str> for ImageId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ImageId> for String {
    fn from(value: ImageId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageId {
    type Error = ImageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[schema(value_type = String, example = "Dwu85P9SOIk")]
    pub id: ImageId,
    /// Provider metadata captured when the image was first saved.
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}
