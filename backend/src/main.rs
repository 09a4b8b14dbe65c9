//! Gallery entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gallery::domain::WebhookVerifier;
use gallery::inbound::http::health::HealthState;
use gallery::inbound::http::session_config::{
    BuildMode, SessionInputs, key_fingerprint, session_settings,
};
use gallery::outbound::persistence::{DbPool, run_pending_migrations};
use gallery::outbound::unsplash::UnsplashHttpSource;
use gallery::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;

    let verifier = WebhookVerifier::new(
        settings.webhook_secret().map_err(io::Error::other)?,
        settings.webhook_tolerance(),
        Arc::new(DefaultClock),
    );
    let pool_config = settings.pool_config().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let session = session_settings(
        SessionInputs {
            key_file: settings.session_key_file.as_deref(),
            cookie_secure: settings.cookie_secure,
            same_site: settings.same_site.as_deref(),
        },
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    if settings.run_migrations() {
        let database_url = pool_config.database_url().to_owned();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
        info!(applied, "database migrations applied");
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| io::Error::other(format!("database pool: {e}")))?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        verifier,
    )
    .with_db_pool(pool.clone());

    match settings.unsplash_access_key() {
        Some(access_key) => {
            let source = UnsplashHttpSource::new(
                settings.unsplash_base_url().map_err(io::Error::other)?,
                access_key,
                settings.unsplash_timeout(),
            )
            .map_err(io::Error::other)?;
            config = config.with_photo_source(source);
        }
        None => warn!("unsplash access key not set; photo search returns empty results"),
    }

    let health_state = web::Data::new(HealthState::new().with_pool(pool));
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
