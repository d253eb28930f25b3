//! Wire-format request payloads and response mapping.
//!
//! The JSON field names are the contract the existing frontend speaks
//! (camelCase, `assetName`, `assetRequesterEmail`, ...); the domain types
//! stay snake_case, so the translation lives here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use assetdesk_billing::Payment;
use assetdesk_catalog::{Asset, AssetPatch, Availability, NewAsset, Quantity};
use assetdesk_core::AssetId;
use assetdesk_directory::User;
use assetdesk_workflow::{AssetRequest, NewRequest, RequestStatus};

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub email: String,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    #[serde(rename = "assetName")]
    pub name: String,
    #[serde(rename = "assetType")]
    pub asset_type: String,
    #[serde(rename = "assetQuantity")]
    pub quantity: Quantity,
}

impl From<CreateAssetRequest> for NewAsset {
    fn from(req: CreateAssetRequest) -> Self {
        NewAsset {
            name: req.name,
            asset_type: req.asset_type,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssetRequest {
    #[serde(rename = "assetName")]
    pub name: Option<String>,
    #[serde(rename = "assetType")]
    pub asset_type: Option<String>,
    #[serde(rename = "assetQuantity")]
    pub quantity: Option<Quantity>,
}

impl From<UpdateAssetRequest> for AssetPatch {
    fn from(req: UpdateAssetRequest) -> Self {
        AssetPatch {
            name: req.name,
            asset_type: req.asset_type,
            quantity: req.quantity,
        }
    }
}

/// Query values arrive as strings, and the frontend sends a field with an
/// empty value to mean "no filter"; treat `""` as absent instead of failing
/// to parse it.
fn empty_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<String>::deserialize(de)?.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => serde_json::from_value(Value::String(s.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    /// `asc` sorts by coerced quantity ascending; anything else descending.
    pub sort: Option<String>,
    #[serde(rename = "stockStatus", default, deserialize_with = "empty_as_none")]
    pub stock_status: Option<Availability>,
    #[serde(rename = "assetType", default, deserialize_with = "empty_as_none")]
    pub asset_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequestRequest {
    #[serde(rename = "assetRequesterEmail")]
    pub requester_email: String,
    #[serde(rename = "assetId")]
    pub asset_id: Option<AssetId>,
    #[serde(rename = "assetName")]
    pub asset_name: String,
    #[serde(rename = "assetType")]
    pub asset_type: Option<String>,
    pub note: Option<String>,
}

impl From<CreateRequestRequest> for NewRequest {
    fn from(req: CreateRequestRequest) -> Self {
        NewRequest {
            requester_email: req.requester_email,
            asset_id: req.asset_id,
            asset_name: req.asset_name,
            asset_type: req.asset_type,
            note: req.note,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestsQuery {
    #[serde(rename = "searchByEmail", default, deserialize_with = "empty_as_none")]
    pub search_by_email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MyRequestQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<RequestStatus>,
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub asset_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequestStatusRequest {
    pub status: RequestStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub email: String,
    /// Minor currency units (cents).
    pub amount: i64,
    pub currency: Option<String>,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentsQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
}

/// User record on the wire. The credential hash never leaves the server.
pub fn user_to_json(user: &User) -> Value {
    json!({
        "id": user.id.to_string(),
        "email": user.email,
        "name": user.name,
        "dateOfBirth": user.date_of_birth,
        "image": user.image,
        "role": user.role,
        "status": user.status,
        "companyName": user.company_name,
        "companyLogo": user.company_logo,
        "packageName": user.package_name,
        "memberLimit": user.member_limit,
        "timestamp": user.timestamp.to_rfc3339(),
    })
}

pub fn asset_to_json(asset: &Asset) -> Value {
    json!({
        "id": asset.id.to_string(),
        "assetName": asset.name,
        "assetType": asset.asset_type,
        "assetAvailability": asset.availability,
        "assetQuantity": asset.quantity,
        "timestamp": asset.timestamp.to_rfc3339(),
    })
}

pub fn request_to_json(request: &AssetRequest) -> Value {
    json!({
        "id": request.id.to_string(),
        "assetId": request.asset_id.map(|id| id.to_string()),
        "assetName": request.asset_name,
        "assetType": request.asset_type,
        "assetRequesterEmail": request.requester_email,
        "assetRequestStatus": request.status,
        "note": request.note,
        "timestamp": request.timestamp.to_rfc3339(),
    })
}

pub fn payment_to_json(payment: &Payment) -> Value {
    json!({
        "id": payment.id.to_string(),
        "email": payment.email,
        "amount": payment.amount,
        "currency": payment.currency,
        "transactionId": payment.transaction_id,
        "timestamp": payment.timestamp.to_rfc3339(),
    })
}
