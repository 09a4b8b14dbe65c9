//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use gallery::domain::WebhookVerifier;
use gallery::outbound::persistence::DbPool;
use gallery::outbound::unsplash::UnsplashHttpSource;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) webhook_verifier: WebhookVerifier,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) photo_source: Option<Arc<UnsplashHttpSource>>,
}

impl ServerConfig {
    /// Construct a server configuration from the session cookie policy, the
    /// listen address, and the webhook verifier.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        webhook_verifier: WebhookVerifier,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            webhook_verifier,
            db_pool: None,
            photo_source: None,
        }
    }

    /// Attach a database connection pool for the user and collection
    /// repositories. Without one, fixture ports answer instead.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the Unsplash client. Without one, photo search returns empty
    /// results.
    #[must_use]
    pub fn with_photo_source(mut self, source: UnsplashHttpSource) -> Self {
        self.photo_source = Some(Arc::new(source));
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
