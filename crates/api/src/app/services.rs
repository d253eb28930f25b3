//! Service wiring shared by every handler.

use std::sync::Arc;

use assetdesk_auth::{Hs256TokenService, TokenService};
use assetdesk_billing::{BillingService, PaymentGateway, StaticGateway, StripeGateway};
use assetdesk_catalog::CatalogService;
use assetdesk_directory::DirectoryService;
use assetdesk_infra::{InMemoryCollection, LogMailer, Mailer};
use assetdesk_workflow::RequestService;

use crate::config::AppConfig;

/// All domain services plus the token signer, built once at startup and
/// handed to handlers through an `Extension`.
pub struct AppServices {
    pub directory: Arc<DirectoryService>,
    pub catalog: CatalogService,
    pub workflow: RequestService,
    pub billing: BillingService,
    pub tokens: Arc<dyn TokenService>,
    pub production: bool,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new(config.mail_from.clone()));

        let gateway: Arc<dyn PaymentGateway> = match &config.stripe_secret_key {
            Some(key) => Arc::new(StripeGateway::new(key.clone())),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY not set; payment intents use the static gateway");
                Arc::new(StaticGateway)
            }
        };

        Self {
            directory: Arc::new(DirectoryService::new(
                Arc::new(InMemoryCollection::new()),
                mailer,
            )),
            catalog: CatalogService::new(Arc::new(InMemoryCollection::new())),
            workflow: RequestService::new(Arc::new(InMemoryCollection::new())),
            billing: BillingService::new(Arc::new(InMemoryCollection::new()), gateway),
            tokens: Arc::new(Hs256TokenService::new(config.jwt_secret.as_bytes())),
            production: config.production,
        }
    }
}
