//! Process configuration loaded via OrthoConfig.
//!
//! Every field can be supplied as a `GALLERY_*` environment variable, a CLI
//! flag, or a configuration file entry. Accessors validate and apply defaults
//! so `main` only has to decide what is fatal.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::identity_events::DEFAULT_TOLERANCE_SECS;
use crate::domain::{WebhookSecret, WebhookSecretError};
use crate::outbound::persistence::{DEFAULT_MAX_CONNECTIONS, PoolConfig};
use crate::outbound::unsplash::DEFAULT_UNSPLASH_BASE_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UNSPLASH_TIMEOUT_SECS: u64 = 10;

/// Configuration failures that stop startup.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required setting {name}")]
    Missing { name: &'static str },
    #[error("invalid webhook signing secret: {0}")]
    SigningSecret(#[from] WebhookSecretError),
    #[error("invalid value for {name}='{value}': {message}")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },
}

/// Application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GALLERY")]
pub struct AppSettings {
    /// `whsec_` secret the identity provider signs webhooks with.
    pub signing_secret: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listen address, `0.0.0.0:8080` by default.
    pub bind_addr: Option<String>,
    /// Unsplash API access key; without one photo search serves empty results.
    pub unsplash_access_key: Option<String>,
    pub unsplash_base_url: Option<String>,
    pub unsplash_timeout_secs: Option<u64>,
    /// Allowed clock skew for webhook timestamps.
    pub webhook_tolerance_secs: Option<i64>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
    pub db_max_connections: Option<u32>,
    pub session_key_file: Option<PathBuf>,
    pub cookie_secure: Option<bool>,
    pub same_site: Option<String>,
}

fn present<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name })
}

impl AppSettings {
    /// The parsed webhook secret. Its absence is fatal.
    pub fn webhook_secret(&self) -> Result<WebhookSecret, SettingsError> {
        let raw = present(self.signing_secret.as_deref(), "signing_secret")?;
        Ok(WebhookSecret::parse(raw)?)
    }

    pub fn webhook_tolerance(&self) -> TimeDelta {
        TimeDelta::seconds(
            self.webhook_tolerance_secs
                .unwrap_or(DEFAULT_TOLERANCE_SECS)
                .max(0),
        )
    }

    /// Pool configuration for the required database.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = present(self.database_url.as_deref(), "database_url")?;
        Ok(PoolConfig::new(url)
            .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)))
    }

    /// Off unless `GALLERY_RUN_MIGRATIONS` says otherwise.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(false)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            name: "bind_addr",
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// The Unsplash access key, when one is configured.
    pub fn unsplash_access_key(&self) -> Option<&str> {
        present(self.unsplash_access_key.as_deref(), "unsplash_access_key").ok()
    }

    pub fn unsplash_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .unsplash_base_url
            .as_deref()
            .unwrap_or(DEFAULT_UNSPLASH_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::Invalid {
            name: "unsplash_base_url",
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn unsplash_timeout(&self) -> Duration {
        Duration::from_secs(
            self.unsplash_timeout_secs
                .unwrap_or(DEFAULT_UNSPLASH_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 12] = [
        "GALLERY_SIGNING_SECRET",
        "GALLERY_DATABASE_URL",
        "GALLERY_BIND_ADDR",
        "GALLERY_UNSPLASH_ACCESS_KEY",
        "GALLERY_UNSPLASH_BASE_URL",
        "GALLERY_UNSPLASH_TIMEOUT_SECS",
        "GALLERY_WEBHOOK_TOLERANCE_SECS",
        "GALLERY_RUN_MIGRATIONS",
        "GALLERY_DB_MAX_CONNECTIONS",
        "GALLERY_SESSION_KEY_FILE",
        "GALLERY_COOKIE_SECURE",
        "GALLERY_SAME_SITE",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> AppSettings {
        let vars = VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        });
        let _guard = lock_env(vars);
        AppSettings::load_from_iter([OsString::from("gallery")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);

        assert!(!settings.run_migrations());
        assert_eq!(
            settings.bind_addr().expect("default bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(
            settings.webhook_tolerance(),
            TimeDelta::seconds(DEFAULT_TOLERANCE_SECS)
        );
        assert_eq!(
            settings.unsplash_base_url().expect("default url").as_str(),
            DEFAULT_UNSPLASH_BASE_URL
        );
        assert!(settings.unsplash_access_key().is_none());
    }

    #[rstest]
    fn missing_secret_and_database_are_fatal() {
        let settings = load_with(&[]);

        assert!(matches!(
            settings.webhook_secret(),
            Err(SettingsError::Missing {
                name: "signing_secret"
            })
        ));
        assert!(matches!(
            settings.pool_config(),
            Err(SettingsError::Missing {
                name: "database_url"
            })
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("GALLERY_SIGNING_SECRET", "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw"),
            ("GALLERY_DATABASE_URL", "postgres://gallery@localhost/gallery"),
            ("GALLERY_BIND_ADDR", "127.0.0.1:9000"),
            ("GALLERY_RUN_MIGRATIONS", "true"),
            ("GALLERY_DB_MAX_CONNECTIONS", "4"),
            ("GALLERY_WEBHOOK_TOLERANCE_SECS", "60"),
            ("GALLERY_UNSPLASH_ACCESS_KEY", "access-key"),
        ]);

        assert!(settings.webhook_secret().is_ok());
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://gallery@localhost/gallery");
        assert_eq!(pool.max_size(), 4);
        assert!(settings.run_migrations());
        assert_eq!(settings.webhook_tolerance(), TimeDelta::seconds(60));
        assert_eq!(settings.unsplash_access_key(), Some("access-key"));
        assert_eq!(
            settings.bind_addr().expect("bind addr").port(),
            9000
        );
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&[("GALLERY_RUN_MIGRATIONS", "true")], true)]
    #[case(&[("GALLERY_RUN_MIGRATIONS", "false")], false)]
    fn migrations_switch_follows_the_environment(
        #[case] overrides: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        assert_eq!(load_with(overrides).run_migrations(), expected);
    }

    #[rstest]
    #[case("GALLERY_BIND_ADDR", "not-an-address", "bind_addr")]
    #[case("GALLERY_UNSPLASH_BASE_URL", "::nope", "unsplash_base_url")]
    fn malformed_values_are_reported(
        #[case] var: &str,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        let settings = load_with(&[(var, value)]);

        let err = match expected {
            "bind_addr" => settings.bind_addr().err(),
            _ => settings.unsplash_base_url().err(),
        }
        .expect("invalid value");
        assert!(matches!(err, SettingsError::Invalid { name, .. } if name == expected));
    }

    #[rstest]
    fn malformed_secret_is_rejected() {
        let settings = load_with(&[("GALLERY_SIGNING_SECRET", "whsec_***")]);
        assert!(matches!(
            settings.webhook_secret(),
            Err(SettingsError::SigningSecret(_))
        ));
    }
}
