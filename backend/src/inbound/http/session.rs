//! Resolves the gallery caller from the private session cookie.
//!
//! The identity provider's front door stores the signed-in user id under
//! [`USER_ID_KEY`]. Handlers take an [`AuthContext`] argument and never see
//! the cookie. An absent or unreadable id yields an anonymous context, which
//! the collections service rejects with `401`. Writing the id is the front
//! door's job; `remember_user` exists for handler tests only.

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{AuthContext, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Record `user_id` as the signed-in caller.
///
/// # Errors
///
/// Internal error when the session state cannot be serialised.
#[cfg(test)]
pub(crate) fn remember_user(session: &Session, user_id: &UserId) -> Result<(), Error> {
    session
        .insert(USER_ID_KEY, user_id.as_ref())
        .map_err(|err| Error::internal(format!("session write failed: {err}")))
}

/// The signed-in caller, if the session names a valid user id.
///
/// # Errors
///
/// Internal error when the stored value is not a string.
pub fn signed_in_user(session: &Session) -> Result<Option<UserId>, Error> {
    let Some(raw) = session
        .get::<String>(USER_ID_KEY)
        .map_err(|err| Error::internal(format!("session read failed: {err}")))?
    else {
        return Ok(None);
    };

    Ok(UserId::new(raw)
        .inspect_err(|err| warn!(error = %err, "ignoring malformed user id in session"))
        .ok())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(signed_in_user(&req.get_session()).map(AuthContext::from))
    }
}
