//! Router assembly.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, patch, post},
};

use crate::config::AppConfig;
use crate::middleware::{AuthState, CorsState, cors, require_session};
use services::AppServices;

use routes::{assets, payments, requests, session, users};

async fn root() -> &'static str {
    "Asset Manager is running"
}

/// Build the application router from configuration.
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(AppServices::from_config(&config));

    let auth_state = AuthState {
        tokens: services.tokens.clone(),
    };
    let cors_state = CorsState {
        allowed_origins: Arc::new(config.allowed_origins.clone()),
    };

    // Routes reachable without a session cookie.
    let public = Router::new()
        .route("/", get(root))
        .route("/signup/hrmanager", post(users::signup_hr_manager))
        .route("/signup/employee", post(users::signup_employee))
        .route("/user", post(users::create_user).put(users::upsert_user))
        .route("/user/:email", get(users::get_user))
        .route("/jwt", post(session::issue))
        .route("/logout", get(session::logout));

    // Everything else wants a verified session; role checks happen in the
    // handlers against the live directory.
    let protected = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/update/:email", patch(users::update_profile))
        .route(
            "/users/:id",
            patch(users::set_team).delete(users::remove_user),
        )
        .route("/assets", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/assets/:id",
            get(assets::get_asset)
                .patch(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/request", post(requests::create_request))
        .route("/request/:email", get(requests::by_requester))
        .route("/myRequest/:email", get(requests::my_requests))
        .route("/requests", get(requests::list_requests))
        .route(
            "/requests/:id",
            get(requests::get_request).patch(requests::set_status),
        )
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route(
            "/payments",
            get(payments::list_payments).post(payments::record_payment),
        )
        .route("/payment/:email", get(payments::payments_by_email))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_session,
        ));

    public
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(cors_state, cors))
        .layer(Extension(services))
}
