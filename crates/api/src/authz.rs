//! Role checks performed inside handlers, after session verification.
//!
//! The role is always resolved from the user directory rather than the
//! token claims, so a promotion or demotion takes effect on the next
//! request instead of at cookie expiry.

use axum::http::StatusCode;
use axum::response::Response;

use assetdesk_auth::capabilities::CapabilityResolver;
use assetdesk_auth::roles::Role;

use crate::app::errors::json_error;
use crate::context::SessionContext;

/// Require the session's user to currently hold `required`.
pub fn require_role(
    resolver: &dyn CapabilityResolver,
    session: &SessionContext,
    required: Role,
) -> Result<(), Response> {
    match resolver.resolve(session.email()) {
        Some(role) if role == required => Ok(()),
        _ => Err(json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "unauthorized access",
        )),
    }
}
