//! Asset-request workflow routes.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use assetdesk_auth::Role;
use assetdesk_core::RequestId;
use assetdesk_workflow::RequestFilter;

use crate::app::dto::{
    CreateRequestRequest, MyRequestQuery, RequestsQuery, UpdateRequestStatusRequest,
    request_to_json,
};
use crate::app::errors::domain_error_response;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::SessionContext;

/// `POST /request`: employee files an asset request.
pub async fn create_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<CreateRequestRequest>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::Employee) {
        return res;
    }
    match services.workflow.file(body.into()) {
        Ok(request) => Json(request_to_json(&request)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `GET /requests`: HR manager lists all requests, optionally narrowed by a
/// substring of the requester email.
pub async fn list_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<RequestsQuery>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let requests = services.workflow.list(query.search_by_email.as_deref());
    Json(requests.iter().map(request_to_json).collect::<Vec<Value>>()).into_response()
}

/// `GET /requests/:id`: HR manager inspects one request.
pub async fn get_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let id: RequestId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.workflow.get(id) {
        Ok(request) => Json(request_to_json(&request)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `GET /request/:email`: employee lists their own requests, unfiltered.
pub async fn by_requester(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(email): Path<String>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::Employee) {
        return res;
    }
    let requests = services
        .workflow
        .list_by_requester(&email, &RequestFilter::default());
    Json(requests.iter().map(request_to_json).collect::<Vec<Value>>()).into_response()
}

/// `GET /myRequest/:email`: employee lists their own requests with search,
/// status, and type filters.
pub async fn my_requests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(email): Path<String>,
    Query(query): Query<MyRequestQuery>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::Employee) {
        return res;
    }
    let filter = RequestFilter {
        search: query.search,
        status: query.status,
        asset_type: query.asset_type,
    };
    let requests = services.workflow.list_by_requester(&email, &filter);
    Json(requests.iter().map(request_to_json).collect::<Vec<Value>>()).into_response()
}

/// `PATCH /requests/:id`: HR manager approves or rejects.
pub async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateRequestStatusRequest>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let id: RequestId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.workflow.set_status(id, body.status) {
        Ok(request) => Json(request_to_json(&request)).into_response(),
        Err(err) => domain_error_response(err),
    }
}
