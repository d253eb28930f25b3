//! Payment gateway seam.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Transport(String),

    #[error("gateway returned an unusable response: {0}")]
    Response(String),
}

/// Creates payment intents at the external gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Returns the opaque client secret for a new intent of `amount_minor`
    /// minor currency units.
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, GatewayError>;
}

/// Stripe implementation over the payment-intents endpoint.
pub struct StripeGateway {
    secret_key: String,
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    client_secret: String,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            http: reqwest::Client::new(),
            base_url: "https://api.stripe.com".to_string(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, GatewayError> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let res = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            return Err(GatewayError::Response(format!(
                "status {}",
                res.status()
            )));
        }

        let intent: PaymentIntentResponse = res
            .json()
            .await
            .map_err(|e| GatewayError::Response(e.to_string()))?;
        Ok(intent.client_secret)
    }
}

/// Gateway standing in when no secret key is configured (dev, tests).
///
/// Returns a deterministic fake client secret; nothing leaves the process.
#[derive(Debug, Default)]
pub struct StaticGateway;

#[async_trait]
impl PaymentGateway for StaticGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, GatewayError> {
        tracing::warn!(amount_minor, currency, "static gateway in use; no real intent created");
        Ok(format!("pi_dev_{amount_minor}_{currency}_secret"))
    }
}
