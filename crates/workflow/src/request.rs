use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assetdesk_core::{AssetId, RequestId};

/// Request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

/// An employee's ask for an asset.
///
/// The asset reference is soft: the id may be absent and the name/type are
/// denormalized at filing time, so a later catalog edit does not rewrite
/// history. Filing performs no stock check and approval decrements nothing;
/// reconciliation with the catalog is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequest {
    pub id: RequestId,
    pub requester_email: String,
    pub asset_id: Option<AssetId>,
    pub asset_name: String,
    pub asset_type: Option<String>,
    pub note: Option<String>,
    pub status: RequestStatus,
    pub timestamp: DateTime<Utc>,
}

/// Filing payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRequest {
    pub requester_email: String,
    pub asset_id: Option<AssetId>,
    pub asset_name: String,
    pub asset_type: Option<String>,
    pub note: Option<String>,
}

/// Filter for an employee's own-requests listing; AND-combined.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// Case-insensitive substring on the asset name.
    pub search: Option<String>,
    pub status: Option<RequestStatus>,
    pub asset_type: Option<String>,
}

impl RequestFilter {
    pub fn matches(&self, request: &AssetRequest) -> bool {
        if let Some(search) = &self.search {
            if !request
                .asset_name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(status) = self.status {
            if request.status != status {
                return false;
            }
        }
        if let Some(asset_type) = &self.asset_type {
            if request.asset_type.as_deref() != Some(asset_type.as_str()) {
                return false;
            }
        }
        true
    }
}
