use std::sync::Arc;

use chrono::Utc;

use assetdesk_core::{DomainError, DomainResult, PaymentId};
use assetdesk_infra::Collection;

use crate::gateway::PaymentGateway;
use crate::payment::{NewPayment, Payment};

/// Payment-intent creation and the payment log.
pub struct BillingService {
    payments: Arc<dyn Collection<Payment>>,
    gateway: Arc<dyn PaymentGateway>,
}

impl BillingService {
    pub fn new(payments: Arc<dyn Collection<Payment>>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { payments, gateway }
    }

    /// Create a payment intent for `price` (major currency units, USD).
    ///
    /// The validated variant: the amount must convert to at least one minor
    /// unit, otherwise the request is rejected instead of silently dropped.
    pub async fn create_payment_intent(&self, price: f64) -> DomainResult<String> {
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::validation("price must be a positive amount"));
        }
        let amount_minor = (price * 100.0).round() as i64;
        if amount_minor < 1 {
            return Err(DomainError::validation("price is below the chargeable minimum"));
        }

        self.gateway
            .create_payment_intent(amount_minor, "usd")
            .await
            .map_err(|e| DomainError::upstream(e.to_string()))
    }

    /// Append a completed payment to the log.
    pub fn record(&self, new: NewPayment) -> Payment {
        let payment = Payment {
            id: PaymentId::new(),
            email: new.email,
            amount: new.amount,
            currency: new.currency,
            transaction_id: new.transaction_id,
            timestamp: Utc::now(),
        };
        self.payments
            .insert(payment.id.as_uuid().to_owned(), payment.clone());
        payment
    }

    /// Payments by payer email, or the whole log when no email is given.
    pub fn list(&self, email: Option<&str>) -> Vec<Payment> {
        match email {
            Some(email) => self.payments.find(&|p: &Payment| p.email == email),
            None => self.payments.all(),
        }
    }
}
