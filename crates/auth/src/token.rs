//! Session token signing and verification (HS256).

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::SessionClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign session token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("invalid session token")]
    Invalid,
}

/// Signs and verifies session tokens.
///
/// Kept behind a trait so the HTTP middleware can be exercised with a fake
/// in tests and the signing algorithm can change without touching handlers.
pub trait TokenService: Send + Sync {
    fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

/// HS256 implementation over a shared secret from the environment.
pub struct Hs256TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenService for Hs256TokenService {
    fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(TokenError::Sign)
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        // Default validation checks `exp` with a small leeway.
        let validation = Validation::new(Algorithm::HS256);
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}
