//! Collections: named, user-owned groupings of images.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Validation errors for collection primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for CollectionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "collection id must be a valid UUID"),
            Self::EmptyName => write!(f, "collection name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "collection name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CollectionValidationError {}

/// Message used whenever a collection is absent or belongs to someone else.
pub const COLLECTION_NOT_FOUND: &str = "Collection not found or access denied.";

/// Collection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(Uuid);

impl CollectionId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh identifier for a new collection.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a textual UUID.
    pub fn parse(raw: &str) -> Result<Self, CollectionValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| CollectionValidationError::InvalidId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum length of a collection display name.
pub const COLLECTION_NAME_MAX: usize = 100;

/// Display name of a collection.
///
/// # Examples
/// ```
/// use gallery::domain::CollectionName;
///
/// let name = CollectionName::new("  Holidays ").expect("valid name");
/// assert_eq!(name.as_ref(), "Holidays");
/// assert!(CollectionName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, CollectionValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(CollectionValidationError::EmptyName);
        }
        if name.chars().count() > COLLECTION_NAME_MAX {
            return Err(CollectionValidationError::NameTooLong {
                max: COLLECTION_NAME_MAX,
            });
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CollectionName> for String {
    fn from(value: CollectionName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CollectionName {
    type Error = CollectionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A collection as seen by its owner.
///
/// ## Invariants
/// - Belongs to exactly one user; every read and write is scoped by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[schema(value_type = String, format = Uuid)]
    pub id: CollectionId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(value_type = String, example = "Holidays")]
    pub name: CollectionName,
    pub created_at: DateTime<Utc>,
}
