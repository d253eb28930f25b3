//! User directory routes.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Path,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use assetdesk_auth::{CapabilityResolver, Role};
use assetdesk_core::UserId;
use assetdesk_directory::{
    EmployeeSignup, GenericSignup, HrManagerSignup, ProfilePatch, TeamMembership, UpsertOutcome,
};

use crate::app::dto::user_to_json;
use crate::app::errors::domain_error_response;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::SessionContext;

/// `POST /signup/hrmanager`.
pub async fn signup_hr_manager(
    Extension(services): Extension<Arc<AppServices>>,
    Json(signup): Json<HrManagerSignup>,
) -> Response {
    match services.directory.register_hr_manager(signup) {
        Ok(user) => Json(user_to_json(&user)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `POST /signup/employee`.
pub async fn signup_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Json(signup): Json<EmployeeSignup>,
) -> Response {
    match services.directory.register_employee(signup) {
        Ok(user) => Json(user_to_json(&user)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `POST /user`: generic signup carrying role/status in the payload.
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(signup): Json<GenericSignup>,
) -> Response {
    match services.directory.register(signup) {
        Ok(user) => Json(user_to_json(&user)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `PUT /user`: invitation upsert.
pub async fn upsert_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(payload): Json<GenericSignup>,
) -> Response {
    match services.directory.upsert(payload) {
        Ok(outcome) => {
            let inserted = matches!(outcome, UpsertOutcome::Inserted(_));
            Json(json!({
                "inserted": inserted,
                "user": user_to_json(outcome.user()),
            }))
            .into_response()
        }
        Err(err) => domain_error_response(err),
    }
}

/// `GET /user/:email`. A miss answers `null`, not an error; the frontend
/// probes this during onboarding.
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(email): Path<String>,
) -> Json<Value> {
    match services.directory.find_by_email(&email) {
        Some(user) => Json(user_to_json(&user)),
        None => Json(Value::Null),
    }
}

/// `GET /users`. Any authenticated caller.
pub async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Value>> {
    Json(services.directory.list().iter().map(user_to_json).collect())
}

/// `PATCH /users/update/:email`: profile edit.
///
/// The caller's live role decides whether `role`/`status` in the patch are
/// allowed to take effect.
pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(email): Path<String>,
    Json(patch): Json<ProfilePatch>,
) -> Response {
    let caller_role = services.directory.resolve(session.email());
    match services.directory.patch_profile(&email, patch, caller_role) {
        Ok(user) => Json(user_to_json(&user)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `PATCH /users/:id`: HR manager adds a user to the company team.
pub async fn set_team(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(membership): Json<TeamMembership>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.directory.set_team_membership(id, membership) {
        Ok(_) => Json(json!({ "success": true, "message": "User added to the team" }))
            .into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `DELETE /users/:id`: HR manager removes a user.
pub async fn remove_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.directory.remove(id) {
        Ok(()) => Json(json!({ "success": true, "message": "User removed from the team" }))
            .into_response(),
        Err(err) => domain_error_response(err),
    }
}
