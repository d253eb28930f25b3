use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assetdesk_core::PaymentId;

/// A completed payment as reported by the client.
///
/// Records are append-only and immutable. The log is not reconciled against
/// the gateway's own transaction record; the submitted payload is trusted.
/// That gap is documented, not hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub email: String,
    /// Minor currency units (cents).
    pub amount: i64,
    pub currency: String,
    /// Gateway transaction id.
    pub transaction_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload for recording a completed payment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub email: String,
    pub amount: i64,
    pub currency: String,
    pub transaction_id: String,
}
