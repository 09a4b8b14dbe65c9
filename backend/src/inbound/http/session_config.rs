//! Session cookie configuration.
//!
//! The identity front door and this service share the private cookie key, so
//! it is read from a file rather than generated. Debug builds tolerate a
//! missing key file and fall back to an ephemeral key; release builds refuse
//! to start without one.

use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroize;

pub const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/gallery_session_key";
pub const SESSION_KEY_MIN_LEN: usize = 64;
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require a real key and a coherent cookie policy.
    Release,
}

impl BuildMode {
    /// # Examples
    ///
    /// ```rust
    /// use gallery::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session toggles as loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionInputs<'a> {
    pub key_file: Option<&'a Path>,
    pub cookie_secure: Option<bool>,
    pub same_site: Option<&'a str>,
}

/// Validated session settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required setting: {name}")]
    MissingSetting { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("same_site=None requires cookie_secure=true")]
    InsecureSameSiteNone,
}

/// Validate session toggles for `mode`.
///
/// # Examples
///
/// ```rust
/// use gallery::inbound::http::session_config::{BuildMode, SessionInputs, session_settings};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("gallery_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let settings = session_settings(
///     SessionInputs {
///         key_file: Some(&key_path),
///         cookie_secure: Some(true),
///         same_site: Some("Strict"),
///     },
///     BuildMode::Release,
/// )?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    inputs: SessionInputs<'_>,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = resolve_cookie_secure(inputs.cookie_secure, mode)?;
    let same_site = resolve_same_site(inputs.same_site, mode, cookie_secure)?;
    let key = load_session_key(
        inputs.key_file.unwrap_or(Path::new(SESSION_KEY_DEFAULT_PATH)),
        mode,
    )?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn resolve_cookie_secure(value: Option<bool>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match value {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!("cookie_secure not set; defaulting to secure");
            Ok(true)
        }
        None => Err(SessionConfigError::MissingSetting {
            name: "cookie_secure",
        }),
    }
}

fn resolve_same_site(
    value: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = value else {
        return Ok(default_same_site);
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("same_site=None without secure cookies; browsers may reject the cookie");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value, "invalid same_site, using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::InvalidSetting {
            name: "same_site",
            value: value.to_owned(),
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn load_session_key(path: &Path, mode: BuildMode) -> Result<Key, SessionConfigError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN && !mode.is_debug() {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// First eight bytes of the SHA-256 of the signing key, hex encoded.
///
/// Logged at startup so operators can tell which key is live.
///
/// ```rust
/// use actix_web::cookie::Key;
/// use gallery::inbound::http::session_config::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
