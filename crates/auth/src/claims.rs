use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Session lifetime. Long-lived by design: the access guard re-checks the
/// caller's role against the directory on every request, so a stale token
/// never grants more than the live directory state allows.
pub const SESSION_TTL_DAYS: i64 = 365;

/// Claims embedded in a session token.
///
/// `role` is a snapshot taken at issuance and is informational only; role
/// guards must never trust it (see `CapabilityResolver`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity the session was issued for.
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Role at issuance time (may be stale).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a fresh session expiring `SESSION_TTL_DAYS` from now.
    pub fn issue_now(email: impl Into<String>, name: Option<String>, role: Option<Role>) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            name,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        }
    }
}
