//! Signature verification for identity provider webhooks.
//!
//! Deliveries are signed with the svix scheme: the signed content is
//! `"{svix-id}.{svix-timestamp}.{raw body}"`, authenticated with
//! HMAC-SHA256 under the endpoint secret and base64 encoded. The
//! `svix-signature` header carries one or more space-separated
//! `version,signature` pairs; any matching `v1` entry accepts the delivery.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use mockable::Clock;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroizing;

use super::WebhookEnvelope;

type HmacSha256 = Hmac<Sha256>;

/// Prefix the identity provider puts in front of endpoint secrets.
pub const SECRET_PREFIX: &str = "whsec_";
/// Header carrying the unique delivery id.
pub const ID_HEADER: &str = "svix-id";
/// Header carrying the delivery timestamp in unix seconds.
pub const TIMESTAMP_HEADER: &str = "svix-timestamp";
/// Header carrying the delivery signatures.
pub const SIGNATURE_HEADER: &str = "svix-signature";
/// Default accepted clock skew between sender and receiver.
pub const DEFAULT_TOLERANCE_SECS: i64 = 5 * 60;

const SIGNATURE_VERSION: &str = "v1";

/// Failures returned by [`WebhookVerifier::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookVerificationError {
    /// One or more of the three signing headers was absent or blank.
    #[error("missing svix headers")]
    MissingHeaders,
    /// Signature, timestamp, or payload did not check out.
    #[error("webhook verification failed: {reason}")]
    VerificationFailed { reason: String },
}

impl WebhookVerificationError {
    fn failed(reason: impl Into<String>) -> Self {
        Self::VerificationFailed {
            reason: reason.into(),
        }
    }
}

/// Configuration errors for [`WebhookSecret`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookSecretError {
    #[error("webhook signing secret must not be empty")]
    Empty,
    #[error("webhook signing secret is not valid base64")]
    InvalidEncoding,
}

/// Decoded endpoint signing secret; wiped from memory on drop.
#[derive(Clone)]
pub struct WebhookSecret(Zeroizing<Vec<u8>>);

impl WebhookSecret {
    /// Parse the secret as shown in the provider dashboard (`whsec_...`) or as
    /// bare base64.
    ///
    /// # Examples
    /// ```
    /// use gallery::domain::WebhookSecret;
    ///
    /// assert!(WebhookSecret::parse("whsec_c2VjcmV0").is_ok());
    /// assert!(WebhookSecret::parse("c2VjcmV0").is_ok());
    /// assert!(WebhookSecret::parse("whsec_").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, WebhookSecretError> {
        let trimmed = raw.trim();
        let encoded = trimmed.strip_prefix(SECRET_PREFIX).unwrap_or(trimmed);
        if encoded.is_empty() {
            return Err(WebhookSecretError::Empty);
        }
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| WebhookSecretError::InvalidEncoding)?;
        if bytes.is_empty() {
            return Err(WebhookSecretError::Empty);
        }
        Ok(Self(Zeroizing::new(bytes)))
    }

    fn mac(&self) -> Result<HmacSha256, WebhookVerificationError> {
        HmacSha256::new_from_slice(&self.0)
            .map_err(|_| WebhookVerificationError::failed("signing key rejected"))
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

/// The three signing headers of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeaders {
    id: String,
    timestamp: String,
    signature: String,
}

impl WebhookHeaders {
    /// Collect header values, failing when any is missing or blank.
    pub fn from_parts(
        id: Option<&str>,
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> Result<Self, WebhookVerificationError> {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .ok_or(WebhookVerificationError::MissingHeaders)
        };
        Ok(Self {
            id: present(id)?,
            timestamp: present(timestamp)?,
            signature: present(signature)?,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Verifies deliveries against the configured secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: WebhookSecret,
    tolerance: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl WebhookVerifier {
    pub fn new(secret: WebhookSecret, tolerance: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret,
            tolerance,
            clock,
        }
    }

    /// Verify a delivery against the current time and decode its envelope.
    pub fn verify(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
    ) -> Result<WebhookEnvelope, WebhookVerificationError> {
        self.verify_at(headers, body, self.clock.utc())
    }

    /// Verify a delivery as of `now`.
    pub fn verify_at(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> Result<WebhookEnvelope, WebhookVerificationError> {
        let sent_at = parse_timestamp(&headers.timestamp)?;
        let skew = now.signed_duration_since(sent_at);
        if skew > self.tolerance {
            return Err(WebhookVerificationError::failed("message timestamp too old"));
        }
        if -skew > self.tolerance {
            return Err(WebhookVerificationError::failed("message timestamp too new"));
        }

        let expected = self.sign(&headers.id, &headers.timestamp, body)?;
        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == SIGNATURE_VERSION)
            .any(|(_, candidate)| bool::from(candidate.as_bytes().ct_eq(expected.as_bytes())));
        if !matched {
            return Err(WebhookVerificationError::failed("no matching signature found"));
        }

        serde_json::from_slice(body)
            .map_err(|err| WebhookVerificationError::failed(format!("invalid payload: {err}")))
    }

    /// Compute the base64 `v1` signature for a delivery.
    pub fn sign(
        &self,
        id: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<String, WebhookVerificationError> {
        let mut mac = self.secret.mac()?;
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, WebhookVerificationError> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| WebhookVerificationError::failed("invalid signature timestamp"))
}
