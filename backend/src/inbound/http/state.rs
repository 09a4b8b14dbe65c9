//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::WebhookVerifier;
use crate::domain::ports::{
    CollectionsCommand, CollectionsQuery, IdentitySyncCommand, PhotoSearchQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity_sync: Arc<dyn IdentitySyncCommand>,
    pub collections: Arc<dyn CollectionsCommand>,
    pub collections_query: Arc<dyn CollectionsQuery>,
    pub photos: Arc<dyn PhotoSearchQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity_sync: Arc<dyn IdentitySyncCommand>,
    pub collections: Arc<dyn CollectionsCommand>,
    pub collections_query: Arc<dyn CollectionsQuery>,
    pub photos: Arc<dyn PhotoSearchQuery>,
    /// Authenticates identity provider deliveries before they reach a port.
    pub webhook_verifier: Arc<WebhookVerifier>,
}

impl HttpState {
    /// Construct state from the ports bundle and the webhook verifier.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use chrono::TimeDelta;
    /// use gallery::domain::ports::{
    ///     FixtureCollectionsCommand, FixtureCollectionsQuery, FixtureIdentitySyncCommand,
    ///     FixturePhotoSearchQuery,
    /// };
    /// use gallery::domain::{WebhookSecret, WebhookVerifier};
    /// use gallery::inbound::http::state::{HttpState, HttpStatePorts};
    /// use mockable::DefaultClock;
    ///
    /// let secret = WebhookSecret::parse("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw")
    ///     .expect("valid secret");
    /// let verifier = WebhookVerifier::new(secret, TimeDelta::minutes(5), Arc::new(DefaultClock));
    /// let ports = HttpStatePorts {
    ///     identity_sync: Arc::new(FixtureIdentitySyncCommand),
    ///     collections: Arc::new(FixtureCollectionsCommand),
    ///     collections_query: Arc::new(FixtureCollectionsQuery),
    ///     photos: Arc::new(FixturePhotoSearchQuery),
    /// };
    /// let state = HttpState::new(ports, verifier);
    /// let _photos = state.photos.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, webhook_verifier: WebhookVerifier) -> Self {
        let HttpStatePorts {
            identity_sync,
            collections,
            collections_query,
            photos,
        } = ports;
        Self {
            identity_sync,
            collections,
            collections_query,
            photos,
            webhook_verifier: Arc::new(webhook_verifier),
        }
    }
}
