//! # JWT Service
//!
//! Access-token handling for the API. Tokens are HS256 JWTs whose `sub` claim
//! is the user's UUID. Issuing tokens at login belongs to the account
//! service; this service can mint them too so that collaborators and tests
//! share one implementation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::utils::constant::ACCESS_TOKEN_EXPIRY;

/// Errors that can occur during JWT operations
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as string)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Service for creating and validating access tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Creates a new JWT service with the provided keys.
    ///
    /// # Arguments
    ///
    /// * `encoding_key` - Key used for signing JWT tokens
    /// * `decoding_key` - Key used for verifying JWT tokens
    pub fn new(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Builds both keys from one shared HMAC secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    /// Creates a signed access token for `user_id` that expires after [`ACCESS_TOKEN_EXPIRY`].
    #[instrument(skip(self))]
    pub fn create_access_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + ACCESS_TOKEN_EXPIRY.as_secs(),
            iat: now,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        trace!("Access token created");

        Ok(token)
    }

    /// Validates an access token and returns its claims.
    ///
    /// This method verifies the token signature and checks expiration.
    ///
    /// # Errors
    ///
    /// - [`JwtError::TokenExpired`] - Token has expired
    /// - [`JwtError::InvalidToken`] - Token is malformed or has invalid signature
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        trace!("Validating access token");

        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(token_data) => {
                trace!(user_id = %token_data.claims.sub, "Access token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                debug!("Access token expired");
                Err(JwtError::TokenExpired)
            }
            Err(e) => {
                debug!(error = %e, "Invalid access token");
                Err(JwtError::InvalidToken)
            }
        }
    }
}
