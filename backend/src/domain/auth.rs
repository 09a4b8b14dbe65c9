//! Caller identity passed explicitly into every ownership-scoped operation.
//!
//! Inbound adapters resolve the caller (for HTTP, from the session cookie) and
//! hand an [`AuthContext`] to services. Services never look the caller up on
//! their own, so an operation cannot forget to scope by owner.

use super::{Error, UserId};

/// Message returned when an operation requires a caller and none is present.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The authenticated caller of an operation, if any.
///
/// # Examples
/// ```
/// use gallery::domain::{AuthContext, ErrorCode, UserId};
///
/// let anonymous = AuthContext::anonymous();
/// assert_eq!(
///     anonymous.require_user().unwrap_err().code(),
///     ErrorCode::Unauthorized
/// );
///
/// let user = UserId::new("user_1").unwrap();
/// let ctx = AuthContext::authenticated(user.clone());
/// assert_eq!(ctx.require_user().unwrap(), &user);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Option<UserId>,
}

impl AuthContext {
    /// Context for a request without a signed-in user.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Context for a signed-in user.
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// The caller, when signed in.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// The caller, or an unauthorised error.
    pub fn require_user(&self) -> Result<&UserId, Error> {
        self.user_id
            .as_ref()
            .ok_or_else(|| Error::unauthorized(NOT_AUTHENTICATED))
    }
}

impl From<Option<UserId>> for AuthContext {
    fn from(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }
}
