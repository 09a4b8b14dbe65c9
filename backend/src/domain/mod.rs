//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, and the services that implement the driving ports.
//! Types validate on construction and document their serde contracts.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Collection, Image: stored entities and their identifiers.
//! - AuthContext: the caller every scoped operation receives.
//! - identity events: webhook verification and typed identity events.
//! - IdentitySyncService, CollectionsService, PhotoSearchService: port
//!   implementations wired up by the server.

pub mod auth;
pub mod collection;
pub mod collections_service;
pub mod error;
pub mod identity_events;
pub mod identity_sync;
pub mod image;
pub mod photo_search_service;
pub mod photos;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthContext, NOT_AUTHENTICATED};
pub use self::collection::{
    COLLECTION_NAME_MAX, COLLECTION_NOT_FOUND, Collection, CollectionId, CollectionName,
    CollectionValidationError,
};
pub use self::collections_service::CollectionsService;
pub use self::error::{Error, ErrorCode};
pub use self::identity_events::{
    IdentityEvent, IdentityEventError, WebhookEnvelope, WebhookHeaders, WebhookSecret,
    WebhookSecretError, WebhookVerificationError, WebhookVerifier,
};
pub use self::identity_sync::IdentitySyncService;
pub use self::image::{IMAGE_ID_MAX, Image, ImageId, ImageValidationError};
pub use self::photo_search_service::PhotoSearchService;
pub use self::photos::{MAX_PER_PAGE, Orientation, PhotoPage, PhotoSearchPage};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EMAIL_MAX, EmailAddress, USER_ID_MAX, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use gallery::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("sign in first"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
