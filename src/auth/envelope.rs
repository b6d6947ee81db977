//! Signed bearer tokens wrapping an encrypted identity snapshot.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::cipher::{CipherError, PayloadCipher};
use crate::config::SecurityConfig;

/// Scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

// 100 years
const MAX_TTL_HOURS: u64 = 24 * 365 * 100;

/// Claim set carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct EnvelopeClaims {
    /// `<iv_hex>:<ciphertext_hex>` of the JSON snapshot.
    pub data: String,
    pub iat: i64,
    pub exp: i64,
}

/// Why a presented credential was not accepted.
///
/// Display strings are safe to return to clients.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Missing bearer token")]
    MissingAuthHeader,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token payload could not be decrypted")]
    DecryptionFailure,

    #[error("Token payload is malformed")]
    MalformedPayload,
}

impl AuthFailure {
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::MissingAuthHeader => "MISSING_AUTH_HEADER",
            AuthFailure::InvalidToken => "INVALID_TOKEN",
            AuthFailure::DecryptionFailure => "DECRYPTION_FAILURE",
            AuthFailure::MalformedPayload => "MALFORMED_PAYLOAD",
        }
    }
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Missing key material: {0}")]
    MissingKeyMaterial(&'static str),

    #[error("Snapshot could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Token signing failed: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies identity tokens.
///
/// Holds only immutable key material, so one instance is shared by every
/// request. Issued tokens cannot be revoked: they stay valid until `exp`.
pub struct IdentityEnvelope {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    cipher: PayloadCipher,
    ttl: Duration,
}

impl std::fmt::Debug for IdentityEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityEnvelope")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl IdentityEnvelope {
    pub fn new(jwt_secret: &str, encryption_key: &str, ttl: Duration) -> Result<Self, EnvelopeError> {
        if jwt_secret.is_empty() {
            return Err(EnvelopeError::MissingKeyMaterial("jwt_secret"));
        }
        if encryption_key.is_empty() {
            return Err(EnvelopeError::MissingKeyMaterial("encryption_key"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
            cipher: PayloadCipher::new(encryption_key),
            ttl,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, EnvelopeError> {
        let hours = security.jwt_expiry_hours.min(MAX_TTL_HOURS) as i64;
        Self::new(
            &security.jwt_secret,
            &security.encryption_key,
            Duration::hours(hours),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a bearer string (`"Bearer <jwt>"`) for `snapshot`, valid for the
    /// configured lifetime.
    pub fn issue<T: Serialize>(&self, snapshot: &T) -> Result<String, EnvelopeError> {
        self.issue_until(snapshot, Utc::now() + self.ttl)
    }

    /// Issue with an explicit expiry instant.
    pub fn issue_until<T: Serialize>(
        &self,
        snapshot: &T,
        expires_at: DateTime<Utc>,
    ) -> Result<String, EnvelopeError> {
        let json = serde_json::to_vec(snapshot)?;
        let blob = self.cipher.encrypt(&json);

        let claims = EnvelopeClaims {
            data: blob.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(format!("{}{}", BEARER_PREFIX, token))
    }

    /// Recover the snapshot from a raw `Authorization` header value.
    pub fn authenticate<T: DeserializeOwned>(&self, header_value: &str) -> Result<T, AuthFailure> {
        let token = header_value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthFailure::MissingAuthHeader)?;

        let claims = self.verify(token)?;

        let plaintext = self.cipher.decrypt_str(&claims.data).map_err(|e: CipherError| {
            tracing::debug!("token payload decryption failed: {}", e);
            AuthFailure::DecryptionFailure
        })?;

        serde_json::from_slice(&plaintext).map_err(|e| {
            tracing::debug!("token payload is not a valid snapshot: {}", e);
            AuthFailure::MalformedPayload
        })
    }

    fn verify(&self, token: &str) -> Result<EnvelopeClaims, AuthFailure> {
        decode::<EnvelopeClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token verification failed: {}", e);
                AuthFailure::InvalidToken
            })
    }
}
