//! Billing: payment-intent creation via the gateway and the append-only
//! payment log.

pub mod gateway;
pub mod payment;
pub mod service;

pub use gateway::{GatewayError, PaymentGateway, StaticGateway, StripeGateway};
pub use payment::{NewPayment, Payment};
pub use service::BillingService;
