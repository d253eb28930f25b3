//! Per-request session context injected by the auth middleware.

use assetdesk_auth::claims::SessionClaims;

/// Verified session attached to the request once the cookie checks out.
#[derive(Debug, Clone)]
pub struct SessionContext {
    claims: SessionClaims,
}

impl SessionContext {
    pub fn new(claims: SessionClaims) -> Self {
        Self { claims }
    }

    /// Identity the token was issued for.
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }
}
