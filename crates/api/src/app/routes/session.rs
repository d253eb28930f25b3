//! Session issue and teardown.

use std::sync::Arc;

use axum::{
    Extension, Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use assetdesk_auth::SessionClaims;

use crate::app::dto::SessionRequest;
use crate::app::errors::{domain_error_response, json_error};
use crate::app::services::AppServices;
use crate::cookies;

/// `POST /jwt`. Verifies the submitted identity against stored credentials
/// and installs a long-lived session cookie.
///
/// Unknown identities are issued a session too (authentication may have
/// happened at an external identity provider); known identities with a
/// stored credential must present the matching password.
pub async fn issue(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<SessionRequest>,
) -> Response {
    let user = match services
        .directory
        .verify_credentials(&body.email, body.password.as_deref())
    {
        Ok(user) => user,
        Err(err) => return domain_error_response(err),
    };

    let role = user.as_ref().and_then(|u| u.role);
    let name = user.as_ref().and_then(|u| u.name.clone()).or(body.name);
    let claims = SessionClaims::issue_now(&body.email, name, role);

    let token = match services.tokens.issue(&claims) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(error = %err, "token signing failed");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", "internal error");
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookies::session_cookie(&token, services.production),
    );
    (headers, Json(json!({ "success": true }))).into_response()
}

/// `GET /logout`. Clears the session cookie; always succeeds.
pub async fn logout(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cookies::clear_session_cookie(services.production),
    );
    (headers, Json(json!({ "success": true }))).into_response()
}
