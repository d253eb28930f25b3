//! Request middleware: session verification and CORS.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};

use assetdesk_auth::token::TokenService;

use crate::app::errors::json_error;
use crate::context::SessionContext;
use crate::cookies;

/// State for the session-verification middleware.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenService>,
}

fn unauthorized() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized access")
}

/// Reject requests without a valid session cookie.
///
/// On success the verified claims are attached to the request as a
/// [`SessionContext`] for handlers and authorization checks downstream.
pub async fn require_session(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token =
        cookies::parse_cookie(req.headers(), cookies::SESSION_COOKIE).ok_or_else(unauthorized)?;

    let claims = state.tokens.verify(&token).map_err(|err| {
        tracing::debug!(error = %err, "session token rejected");
        unauthorized()
    })?;

    req.extensions_mut().insert(SessionContext::new(claims));
    Ok(next.run(req).await)
}

/// State for the CORS middleware: the exact origins allowed to send
/// credentialed requests.
#[derive(Clone)]
pub struct CorsState {
    pub allowed_origins: Arc<Vec<String>>,
}

impl CorsState {
    fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

/// Minimal CORS layer for the configured origins, with credentials.
pub async fn cors(State(state): State<CorsState>, req: Request<Body>, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let allowed = origin.as_deref().is_some_and(|o| state.allows(o));

    if req.method() == Method::OPTIONS {
        let mut res = Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::empty())
            .unwrap_or_default();
        if allowed {
            apply_cors_headers(&mut res, origin.as_deref());
            res.headers_mut().insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
            );
            res.headers_mut().insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("content-type"),
            );
        }
        return res;
    }

    let mut res = next.run(req).await;
    if allowed {
        apply_cors_headers(&mut res, origin.as_deref());
    }
    res
}

fn apply_cors_headers(res: &mut Response, origin: Option<&str>) {
    let Some(origin) = origin else { return };
    let Ok(value) = HeaderValue::from_str(origin) else {
        return;
    };
    res.headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    res.headers_mut()
        .insert(header::VARY, HeaderValue::from_static("Origin"));
}
