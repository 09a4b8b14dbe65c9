//! Identity provider webhook events.
//!
//! A delivery is first authenticated by [`WebhookVerifier`], which yields the
//! untyped [`WebhookEnvelope`]. The envelope is then interpreted as an
//! [`IdentityEvent`]. Interpretation failures happen after verification and
//! are processing failures, not client errors.

mod verifier;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{User, UserId, UserValidationError};

pub use verifier::{
    DEFAULT_TOLERANCE_SECS, ID_HEADER, SECRET_PREFIX, SIGNATURE_HEADER, TIMESTAMP_HEADER,
    WebhookHeaders, WebhookSecret, WebhookSecretError, WebhookVerificationError, WebhookVerifier,
};

pub const USER_CREATED: &str = "user.created";
pub const USER_UPDATED: &str = "user.updated";
pub const USER_DELETED: &str = "user.deleted";

/// Verified but not yet interpreted webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

/// Typed identity lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    UserCreated(User),
    UserUpdated(User),
    UserDeleted { id: UserId },
    /// Any event type this service does not act on.
    Other { event_type: String },
}

impl IdentityEvent {
    pub fn event_type(&self) -> &str {
        match self {
            Self::UserCreated(_) => USER_CREATED,
            Self::UserUpdated(_) => USER_UPDATED,
            Self::UserDeleted { .. } => USER_DELETED,
            Self::Other { event_type } => event_type,
        }
    }
}

/// Reasons a verified envelope could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityEventError {
    #[error("{event_type} payload is malformed: {message}")]
    MalformedPayload { event_type: String, message: String },
    #[error("{event_type} payload has no email addresses")]
    MissingEmail { event_type: String },
    #[error("{event_type} payload is invalid: {source}")]
    InvalidUser {
        event_type: String,
        source: UserValidationError,
    },
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: String,
    #[serde(default)]
    email_addresses: Vec<EmailAddressData>,
}

#[derive(Debug, Deserialize)]
struct EmailAddressData {
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct DeletedData {
    id: String,
}

impl TryFrom<WebhookEnvelope> for IdentityEvent {
    type Error = IdentityEventError;

    fn try_from(envelope: WebhookEnvelope) -> Result<Self, Self::Error> {
        let WebhookEnvelope { event_type, data } = envelope;
        match event_type.as_str() {
            USER_CREATED => user_from_data(&event_type, data).map(Self::UserCreated),
            USER_UPDATED => user_from_data(&event_type, data).map(Self::UserUpdated),
            USER_DELETED => {
                let deleted: DeletedData = decode(&event_type, data)?;
                let id = UserId::new(deleted.id).map_err(|source| {
                    IdentityEventError::InvalidUser {
                        event_type: event_type.clone(),
                        source,
                    }
                })?;
                Ok(Self::UserDeleted { id })
            }
            _ => Ok(Self::Other { event_type }),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    event_type: &str,
    data: Value,
) -> Result<T, IdentityEventError> {
    serde_json::from_value(data).map_err(|err| IdentityEventError::MalformedPayload {
        event_type: event_type.to_owned(),
        message: err.to_string(),
    })
}

fn user_from_data(event_type: &str, data: Value) -> Result<User, IdentityEventError> {
    let UserData {
        id,
        email_addresses,
    } = decode(event_type, data)?;
    let primary = email_addresses
        .into_iter()
        .next()
        .ok_or_else(|| IdentityEventError::MissingEmail {
            event_type: event_type.to_owned(),
        })?;
    User::try_from_strings(id, primary.email_address).map_err(|source| {
        IdentityEventError::InvalidUser {
            event_type: event_type.to_owned(),
            source,
        }
    })
}
