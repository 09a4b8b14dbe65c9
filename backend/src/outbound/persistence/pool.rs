//! PostgreSQL connection pool shared by the Diesel repositories.
//!
//! One [`DbPool`] is opened in `main`, cloned into the user and collection
//! repositories and the readiness probe, and closed when the last clone
//! drops after the server stops.

use std::time::Duration;

use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Failures opening, borrowing from, or probing the pool.
    pub enum PoolError {
        /// No connection became free before the checkout timeout.
        Checkout { message: String } => "database checkout failed: {message}",
        /// The pool could not be opened at startup.
        Build { message: String } => "database pool could not be opened: {message}",
        /// A borrowed connection failed the liveness statement.
        Probe { message: String } => "database probe failed: {message}",
    }
}

impl PoolError {
    /// Underlying driver message, without the variant prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout { message } | Self::Build { message } | Self::Probe { message } => {
                message
            }
        }
    }
}

/// Connections opened when `GALLERY_DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing and timeouts.
///
/// ```
/// use std::time::Duration;
/// use gallery::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://gallery@localhost/gallery")
///     .with_max_size(0)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_CONNECTIONS,
            min_idle: Some(1),
            connection_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Clamped to at least one connection.
    pub fn with_max_size(self, max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
            ..self
        }
    }

    pub fn with_min_idle(self, min_idle: Option<u32>) -> Self {
        Self { min_idle, ..self }
    }

    pub fn with_connection_timeout(self, connection_timeout: Duration) -> Self {
        Self {
            connection_timeout,
            ..self
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Cloneable handle over a `bb8` pool of async Diesel connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Open the pool, eagerly establishing `min_idle` connections.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the URL is malformed or the server refuses
    /// the initial connections.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
            min_idle,
            connection_timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        Pool::builder()
            .max_size(max_size)
            .min_idle(min_idle)
            .connection_timeout(connection_timeout)
            .build(manager)
            .await
            .map(|inner| Self { inner })
            .map_err(|err| PoolError::build(err.to_string()))
    }

    /// Borrow a connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] once the checkout timeout elapses.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Run `SELECT 1` on a borrowed connection.
    pub async fn ping(&self) -> Result<(), PoolError> {
        let mut conn = self.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(|err| PoolError::probe(err.to_string()))
    }
}
