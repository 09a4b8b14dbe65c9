//! Users mirrored from the identity provider.
//!
//! Rows are only ever written by the identity webhook, so a [`UserId`] is the
//! provider's subject id verbatim and an [`EmailAddress`] is the primary
//! address reported in the event.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Longest subject id accepted from the provider.
pub const USER_ID_MAX: usize = 255;
/// Longest email address accepted (RFC 5321 path limit).
pub const EMAIL_MAX: usize = 320;

/// Why a raw id or address was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must not contain surrounding whitespace")]
    InvalidId,
    #[error("user id must be at most {max} characters")]
    IdTooLong { max: usize },
    #[error("email address must not be empty")]
    EmptyEmail,
    #[error("email address must look like local@domain")]
    InvalidEmail,
    #[error("email address must be at most {max} characters")]
    EmailTooLong { max: usize },
}

macro_rules! string_newtype {
    ($name:ident) => {
        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = UserValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

/// Provider subject id, for example `user_2NNEqL2nrIRdJ194ndJqAHwEfxC`.
///
/// ```
/// use gallery::domain::UserId;
///
/// assert_eq!(UserId::new("user_2abc").expect("valid").as_ref(), "user_2abc");
/// assert!(UserId::new(" user_2abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// # Errors
    ///
    /// Rejects empty, padded, or overlong ids. Ids are never trimmed, since
    /// they must match the provider's subject byte for byte.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            Err(UserValidationError::EmptyId)
        } else if id.trim() != id {
            Err(UserValidationError::InvalidId)
        } else if id.chars().count() > USER_ID_MAX {
            Err(UserValidationError::IdTooLong { max: USER_ID_MAX })
        } else {
            Ok(Self(id))
        }
    }
}

string_newtype!(UserId);

/// Primary address of a mirrored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim, then require exactly one `@` with text on both sides.
    ///
    /// # Errors
    ///
    /// Rejects blank, overlong, or malformed addresses.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let email = email.as_ref().trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let well_formed = email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }) && !email.contains(char::is_whitespace);
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email.to_owned()))
    }
}

string_newtype!(EmailAddress);

/// A mirrored user.
///
/// `id` never changes once stored. `email` tracks the latest primary address
/// the provider reported through `user.updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "user_2NNEqL2nrIRdJ194ndJqAHwEfxC")]
    id: UserId,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
}

impl User {
    pub fn new(id: UserId, email: EmailAddress) -> Self {
        Self { id, email }
    }

    /// Validate both parts from raw strings.
    pub fn try_from_strings(
        id: impl Into<String>,
        email: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, EmailAddress::new(email)?))
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
