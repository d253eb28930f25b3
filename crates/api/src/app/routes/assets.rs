//! Asset catalog routes.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use assetdesk_auth::Role;
use assetdesk_catalog::{AssetFilter, SortDirection};
use assetdesk_core::AssetId;

use crate::app::dto::{AssetQuery, CreateAssetRequest, UpdateAssetRequest, asset_to_json};
use crate::app::errors::domain_error_response;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::SessionContext;

/// `GET /assets`: filtered listing, sorted by coerced quantity.
pub async fn list_assets(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<AssetQuery>,
) -> Json<Vec<Value>> {
    let filter = AssetFilter {
        search: query.search,
        availability: query.stock_status,
        asset_type: query.asset_type,
    };
    let sort = SortDirection::parse(query.sort.as_deref());
    Json(
        services
            .catalog
            .list(&filter, sort)
            .iter()
            .map(asset_to_json)
            .collect(),
    )
}

/// `GET /assets/:id`.
pub async fn get_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: AssetId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.catalog.get(id) {
        Ok(asset) => Json(asset_to_json(&asset)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `POST /assets`: HR managers only.
pub async fn create_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<CreateAssetRequest>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    match services.catalog.create(body.into()) {
        Ok(asset) => Json(asset_to_json(&asset)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `PATCH /assets/:id`: HR managers only.
pub async fn update_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAssetRequest>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let id: AssetId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.catalog.update(id, body.into()) {
        Ok(asset) => Json(asset_to_json(&asset)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `DELETE /assets/:id`: HR managers only.
pub async fn delete_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(res) = authz::require_role(services.directory.as_ref(), &session, Role::HrManager) {
        return res;
    }
    let id: AssetId = match id.parse() {
        Ok(id) => id,
        Err(err) => return domain_error_response(err),
    };
    match services.catalog.delete(id) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(err) => domain_error_response(err),
    }
}
