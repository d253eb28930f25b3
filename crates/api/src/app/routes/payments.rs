//! Billing routes.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use assetdesk_billing::NewPayment;

use crate::app::dto::{
    CreatePaymentIntentRequest, PaymentsQuery, RecordPaymentRequest, payment_to_json,
};
use crate::app::errors::domain_error_response;
use crate::app::services::AppServices;

/// `POST /create-payment-intent`: price in major units, client secret back.
pub async fn create_payment_intent(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreatePaymentIntentRequest>,
) -> Response {
    match services.billing.create_payment_intent(body.price).await {
        Ok(client_secret) => Json(json!({ "clientSecret": client_secret })).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// `POST /payments`: record a completed payment.
pub async fn record_payment(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RecordPaymentRequest>,
) -> Response {
    let payment = services.billing.record(NewPayment {
        email: body.email,
        amount: body.amount,
        currency: body.currency.unwrap_or_else(|| "usd".to_string()),
        transaction_id: body.transaction_id,
    });
    Json(payment_to_json(&payment)).into_response()
}

/// `GET /payments`: payment log, optionally by payer email.
pub async fn list_payments(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PaymentsQuery>,
) -> Json<Vec<Value>> {
    Json(
        services
            .billing
            .list(query.email.as_deref())
            .iter()
            .map(payment_to_json)
            .collect(),
    )
}

/// `GET /payment/:email`: payments by payer email.
pub async fn payments_by_email(
    Extension(services): Extension<Arc<AppServices>>,
    Path(email): Path<String>,
) -> Json<Vec<Value>> {
    Json(
        services
            .billing
            .list(Some(&email))
            .iter()
            .map(payment_to_json)
            .collect(),
    )
}
